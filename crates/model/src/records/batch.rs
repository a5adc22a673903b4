use crate::records::row::ResultRow;
use serde::{Deserialize, Serialize};

/// Paging flags the server attaches to the final row of a response only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalRowFlags {
    pub row_count_so_far: u64,
    pub total_records: u64,
    pub is_last_row_overall: bool,
}

/// Batch-level metadata, lifted off the terminal row once per batch so that
/// nothing downstream has to look at row positions again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetadata {
    /// Offset the batch was requested at (0-based).
    pub start_offset: u64,

    /// Rows in this batch.
    pub row_count: usize,

    /// Running count at the terminal row.
    pub row_count_so_far: u64,

    /// Total rows server-side, 0 if unknown.
    pub total_records: u64,

    /// Whether the terminal row is the last row of the whole result set.
    pub is_last_row_overall: bool,
}

impl BatchMetadata {
    /// Extracts batch metadata from a response. A response without terminal
    /// flags is never treated as the end of the result set, however short
    /// it is.
    pub fn extract(
        start_offset: u64,
        row_count: usize,
        terminal: Option<&TerminalRowFlags>,
    ) -> Self {
        match terminal {
            Some(flags) if row_count > 0 => BatchMetadata {
                start_offset,
                row_count,
                row_count_so_far: flags.row_count_so_far,
                total_records: flags.total_records,
                is_last_row_overall: flags.is_last_row_overall,
            },
            _ => BatchMetadata {
                start_offset,
                row_count,
                row_count_so_far: start_offset + row_count as u64,
                total_records: 0,
                is_last_row_overall: false,
            },
        }
    }

    /// Metadata for a query the server reported as having no (more) rows.
    pub fn exhausted(start_offset: u64) -> Self {
        BatchMetadata {
            start_offset,
            row_count: 0,
            row_count_so_far: start_offset,
            total_records: 0,
            is_last_row_overall: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Builds positional rows, numbering them from `start_offset` and placing
    /// the terminal flags on the final row.
    pub fn attach(&self, columns_by_row: Vec<Vec<String>>) -> Vec<ResultRow> {
        let last = columns_by_row.len().saturating_sub(1);
        columns_by_row
            .into_iter()
            .enumerate()
            .map(|(idx, columns)| {
                let mut row = ResultRow::new(columns, self.start_offset + idx as u64 + 1);
                row.total_records = self.total_records;
                if idx == last {
                    row.row_count_so_far = self.row_count_so_far;
                    row.is_last_row_overall = self.is_last_row_overall;
                }
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(n: usize) -> Vec<Vec<String>> {
        (0..n).map(|i| vec![format!("c{i}")]).collect()
    }

    #[test]
    fn test_terminal_flags_only_on_last_row() {
        let flags = TerminalRowFlags {
            row_count_so_far: 13,
            total_records: 13,
            is_last_row_overall: true,
        };
        let meta = BatchMetadata::extract(10, 3, Some(&flags));
        let rows = meta.attach(cols(3));

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].row_count_so_far, 11);
        assert_eq!(rows[1].row_count_so_far, 12);
        assert!(!rows[0].is_last_row_overall);
        assert!(!rows[1].is_last_row_overall);
        assert_eq!(rows[2].row_count_so_far, 13);
        assert!(rows[2].is_last_row_overall);
        assert!(rows.iter().all(|r| r.total_records == 13));
    }

    #[test]
    fn test_short_batch_without_flags_is_not_last() {
        let meta = BatchMetadata::extract(0, 2, None);
        assert!(!meta.is_last_row_overall);
        assert_eq!(meta.row_count_so_far, 2);
        assert_eq!(meta.total_records, 0);

        let rows = meta.attach(cols(2));
        assert!(!rows[1].is_last_row_overall);
    }

    #[test]
    fn test_exhausted() {
        let meta = BatchMetadata::exhausted(50);
        assert!(meta.is_empty());
        assert!(meta.is_last_row_overall);
        assert_eq!(meta.row_count_so_far, 50);
        assert!(meta.attach(Vec::new()).is_empty());
    }
}
