use serde::{Deserialize, Serialize};

/// One row of a GenQuery result. Columns are positional and follow the order
/// of the query's select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub columns: Vec<String>,

    /// 1-based position of this row within the full result set.
    pub row_count_so_far: u64,

    /// True only on the final row of the final batch.
    pub is_last_row_overall: bool,

    /// Total rows server-side, or 0 if the server did not compute it.
    pub total_records: u64,
}

impl ResultRow {
    pub fn new(columns: Vec<String>, row_count_so_far: u64) -> Self {
        ResultRow {
            columns,
            row_count_so_far,
            is_last_row_overall: false,
            total_records: 0,
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }
}
