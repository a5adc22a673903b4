use connectors::error::{QueryError, ResolveError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagerError {
    /// Only collections have children to page through.
    #[error("Not a collection: {0}")]
    NotACollection(String),

    /// The descriptor has no pages left in either stream.
    #[error("No more pages")]
    NoMorePaging,

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Failed to resolve path: {0}")]
    Resolve(ResolveError),

    #[error("Listing query failed: {0}")]
    Query(#[from] QueryError),
}

impl From<ResolveError> for PagerError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound(path) => PagerError::NotFound(path),
            other => PagerError::Resolve(other),
        }
    }
}
