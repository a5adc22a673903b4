use model::records::{batch::BatchMetadata, row::ResultRow};
use planner::query::{ast::column::CatalogColumn, translator::TranslatedQuery};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the server keeps a cursor open after a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CloseBehavior {
    /// The server releases the cursor as soon as the batch is sent.
    #[default]
    AutoClose,
    /// The cursor stays open until the caller continues to the end or closes.
    ManualClose,
}

impl fmt::Display for CloseBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseBehavior::AutoClose => write!(f, "auto_close"),
            CloseBehavior::ManualClose => write!(f, "manual_close"),
        }
    }
}

/// The rows of one request/response cycle and everything needed to ask for
/// the next batch.
#[derive(Debug, Clone)]
pub struct ResultBatch {
    rows: Vec<ResultRow>,
    metadata: BatchMetadata,
    continuation: Option<u64>,
    close_behavior: CloseBehavior,
    zone: Option<String>,
    query: TranslatedQuery,
}

impl ResultBatch {
    pub(crate) fn new(
        rows: Vec<ResultRow>,
        metadata: BatchMetadata,
        continuation: Option<u64>,
        close_behavior: CloseBehavior,
        zone: Option<String>,
        query: TranslatedQuery,
    ) -> Self {
        ResultBatch {
            rows,
            metadata,
            continuation,
            close_behavior,
            zone,
            query,
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }

    pub fn metadata(&self) -> &BatchMetadata {
        &self.metadata
    }

    /// Cursor handle for the next batch. Always `None` for auto-closed
    /// batches.
    pub fn continuation_token(&self) -> Option<u64> {
        self.continuation
    }

    pub fn close_behavior(&self) -> CloseBehavior {
        self.close_behavior
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn query(&self) -> &TranslatedQuery {
        &self.query
    }

    /// True if a further batch can be requested with `continue_query`.
    pub fn has_more(&self) -> bool {
        self.continuation.is_some() && !self.metadata.is_last_row_overall
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Value of `column` in row `row`, if the column was selected.
    pub fn value(&self, row: usize, column: &CatalogColumn) -> Option<&str> {
        let position = self.query.position_of(column)?;
        self.rows.get(row)?.get(position)
    }

    /// Zero-based offset of the row after this batch.
    pub(crate) fn next_offset(&self) -> u64 {
        self.metadata.start_offset + self.metadata.row_count as u64
    }
}
