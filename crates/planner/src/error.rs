use thiserror::Error;

/// Errors raised while building or translating a GenQuery. None of these
/// ever reach the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenQueryError {
    /// The query specification is malformed (no selects, bad column or
    /// operator/literal combination, zero row limit).
    #[error("Invalid query specification: {0}")]
    InvalidSpecification(String),

    /// A column has no wire identifier.
    #[error("Unresolvable column: {0}")]
    UnresolvableColumn(String),

    /// A rendered condition fragment could not be parsed back.
    #[error("Malformed condition fragment: {0}")]
    MalformedFragment(String),
}
