//! Turns column-major query output into positional rows.

use crate::{error::ExecutionError, protocol::message::GenQueryOut};
use model::records::{
    batch::{BatchMetadata, TerminalRowFlags},
    row::ResultRow,
};
use planner::query::translator::TranslatedQuery;

/// Decodes `out` against the query that produced it. The response must carry
/// exactly the selected columns, in select order, each with `row_count`
/// values.
pub fn decode_rows(
    query: &TranslatedQuery,
    out: GenQueryOut,
    start_offset: u64,
) -> Result<(Vec<ResultRow>, BatchMetadata), ExecutionError> {
    if out.row_count == 0 {
        return Ok((Vec::new(), BatchMetadata::exhausted(start_offset)));
    }

    let expected = query.column_count();
    if out.attribute_count != expected || out.sql_results.len() != expected {
        return Err(ExecutionError::MalformedResponse(format!(
            "expected {expected} columns, got {} (attribute count {})",
            out.sql_results.len(),
            out.attribute_count
        )));
    }

    for (position, (result, select)) in out.sql_results.iter().zip(&query.selects).enumerate() {
        if result.attribute_index != select.column_id {
            return Err(ExecutionError::MalformedResponse(format!(
                "column {position} has id {}, expected {}",
                result.attribute_index, select.column_id
            )));
        }
        if result.values.len() != out.row_count {
            return Err(ExecutionError::MalformedResponse(format!(
                "column {} has {} values for {} rows",
                select.column_id,
                result.values.len(),
                out.row_count
            )));
        }
    }

    let mut rows: Vec<Vec<String>> = (0..out.row_count)
        .map(|_| Vec::with_capacity(expected))
        .collect();
    for result in out.sql_results {
        for (row, value) in rows.iter_mut().zip(result.values) {
            row.push(value);
        }
    }

    // Some servers report the total in the header only.
    let terminal = out.terminal_row.map(|flags| TerminalRowFlags {
        total_records: match flags.total_records {
            0 => out.total_row_count,
            total => total,
        },
        ..flags
    });

    let metadata = BatchMetadata::extract(start_offset, out.row_count, terminal.as_ref());
    Ok((metadata.attach(rows), metadata))
}
