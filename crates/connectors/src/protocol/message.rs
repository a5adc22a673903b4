use model::records::batch::TerminalRowFlags;
use planner::query::{
    ast::options::QueryOptions,
    translator::{WireCondition, WireOrderBy, WireSelect},
};
use serde::{Deserialize, Serialize};

/// API number of the general query call.
pub const GEN_QUERY_API_NUMBER: u32 = 702;

/// Server status for a query that matched no (more) rows.
pub const CAT_NO_ROWS_FOUND: i32 = -808_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiRequest {
    GenQuery(GenQueryInp),
}

impl ApiRequest {
    pub fn api_number(&self) -> u32 {
        match self {
            ApiRequest::GenQuery(_) => GEN_QUERY_API_NUMBER,
        }
    }
}

/// General query input.
///
/// `continue_index` is 0 for a new query. A request with `max_rows` 0 and a
/// nonzero `continue_index` closes that server-side cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenQueryInp {
    pub max_rows: usize,
    pub continue_index: u64,
    pub partial_start_index: u64,
    pub options: QueryOptions,
    pub zone: Option<String>,
    pub selects: Vec<WireSelect>,
    pub conditions: Vec<WireCondition>,
    pub order_by: Vec<WireOrderBy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiResponse {
    GenQuery(GenQueryOut),
    Error { code: i32, message: String },
}

/// General query output. Results are column-major: one [`SqlResult`] per
/// selected attribute, each holding `row_count` values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenQueryOut {
    pub row_count: usize,
    pub attribute_count: usize,
    /// Cursor handle for the next batch, 0 when the server holds none.
    pub continue_index: u64,
    pub total_row_count: u64,
    pub sql_results: Vec<SqlResult>,
    /// Paging flags of the final row, when the server sent them.
    pub terminal_row: Option<TerminalRowFlags>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlResult {
    /// Wire id of the column these values belong to.
    pub attribute_index: u32,
    pub values: Vec<String>,
}
