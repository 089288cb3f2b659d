//! Contract error types for the authoring toolkit.
//!
//! Validation failures are never reported through this type; they are data in
//! [`crate::validation::ValidationResult`].
use thiserror::Error;

/// Errors raised when a caller breaks an operation's contract.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid selection {start}..{end} for buffer of length {len}")]
    InvalidSelection { start: usize, end: usize, len: usize },

    #[error("Invalid pattern for field '{field}': {pattern}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown field: {0}")]
    UnknownField(String),
}
