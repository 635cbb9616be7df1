//! Error types for forcelink.
//!
//! All crates return `ForcelinkResult<T>` from fallible operations.
//! Every variant is fatal for the current run: nothing in the
//! participant retries or degrades.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for forcelink.
#[derive(Debug, Error)]
pub enum ForcelinkError {
    /// An input file could not be opened.
    #[error("File '{}' not found", .path.display())]
    FileNotFound { path: PathBuf },

    /// A field name was passed that the operation does not accept.
    #[error("{operation}: field name '{name}' is invalid")]
    InvalidField {
        operation: &'static str,
        name: String,
    },

    /// A buffer has the wrong length for the operation.
    #[error("{operation}: invalid size (expected {expected}, got {actual})")]
    SizeMismatch {
        operation: &'static str,
        expected: String,
        actual: usize,
    },

    /// A rollback was requested but no checkpoint exists.
    #[error("reload_old_state: no saved state available")]
    NoSavedState,

    /// Strict point-cloud parsing hit a token that is not a number.
    #[error("Invalid numeric token '{token}' on line {line}")]
    InvalidToken { line: usize, token: String },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ForcelinkError {
    /// Shorthand for a size error whose expectation is a divisibility rule.
    pub fn not_multiple_of(operation: &'static str, dim: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            operation,
            expected: format!("a multiple of {dim}"),
            actual,
        }
    }

    /// Shorthand for a size error with an exact expected length.
    pub fn wrong_length(operation: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            operation,
            expected: expected.to_string(),
            actual,
        }
    }
}

/// Convenience alias for `Result<T, ForcelinkError>`.
pub type ForcelinkResult<T> = Result<T, ForcelinkError>;
