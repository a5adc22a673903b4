use planner::error::GenQueryError;
use thiserror::Error;

/// Failures of the connection carrying protocol messages.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Low-level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer sent something that is not a valid protocol message.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Connection closed")]
    ConnectionClosed,
}

/// A query reached the server (or tried to) and did not produce a batch.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with an error status.
    #[error("Server rejected query with code {code}: {message}")]
    Rejected { code: i32, message: String },

    /// The response does not match the query that was sent.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum QueryError {
    /// Local validation or translation failed; nothing was sent.
    #[error("Query specification error: {0}")]
    Spec(#[from] GenQueryError),

    #[error("Query execution failed: {0}")]
    Execution(#[from] ExecutionError),

    /// A continuation was requested for a batch that has none.
    #[error("No more results for this query")]
    NoMoreResults,
}

impl From<TransportError> for QueryError {
    fn from(err: TransportError) -> Self {
        QueryError::Execution(ExecutionError::Transport(err))
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
