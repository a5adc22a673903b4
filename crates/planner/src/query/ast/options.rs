use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Query option bits sent with every GenQuery request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct QueryOptions: u32 {
        /// Ask the server to compute the total row count of the result set.
        const RETURN_TOTAL_ROW_COUNT = 0x20;
        /// Return duplicate rows instead of the default distinct rows.
        const NO_DISTINCT = 0x40;
        /// Release the server-side cursor after this batch.
        const AUTO_CLOSE = 0x100;
        /// Compare condition literals case-insensitively.
        const UPPER_CASE_WHERE = 0x200;
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions::empty()
    }
}
