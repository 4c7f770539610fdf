//! # Error Types
//!
//! Every fallible operation in the Mantel pipeline returns [`MantelError`].
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Kinds
//!
//! - **Invalid input**: a structural precondition was violated (fewer than
//!   two items, a condensed vector whose length is not triangular, fewer
//!   than two randomizations, mismatched vector lengths).
//! - **Malformed input**: external data did not parse into the expected
//!   two-column shape.
//! - **Degenerate input**: the result is numerically undefined (zero
//!   variance for a correlation, zero standard deviation for a Z-score).
//!
//! No operation substitutes a default value for an undefined result; the
//! error is returned to the immediate caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for the Mantel pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MantelError {
    /// Structural precondition violated.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// External data does not have the expected two-column shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Numerically undefined result.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

/// Discriminant of [`MantelError`], for callers that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidInput,
    MalformedInput,
    DegenerateInput,
}

impl MantelError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            Self::DegenerateInput(_) => ErrorKind::DegenerateInput,
        }
    }

    /// The message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(m) | Self::MalformedInput(m) | Self::DegenerateInput(m) => m,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InvalidInput => "InvalidInput",
            Self::MalformedInput => "MalformedInput",
            Self::DegenerateInput => "DegenerateInput",
        };
        f.write_str(s)
    }
}

/// Result alias used across `mantel-core`.
pub type Result<T> = std::result::Result<T, MantelError>;
