//! Error types for fuzzkit.

use thiserror::Error;

/// Errors that can occur when constructing or querying an index.
///
/// Query paths are total: once an index is built, searching it cannot fail.
/// Every variant here is a rejected construction argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Empty pattern provided to a scanner.
    #[error("pattern is empty")]
    EmptyPattern,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for fuzzkit operations.
pub type Result<T> = std::result::Result<T, MatchError>;
