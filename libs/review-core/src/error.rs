//! Error types for review-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised when parsing user input into core types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid rating {0}: expected 1-4")]
    InvalidRating(u8),

    #[error("invalid rating \"{0}\": expected again, hard, good, easy or 1-4")]
    UnparsableRating(String),

    #[error("invalid days-ahead filter: {0}")]
    InvalidFilter(String),

    #[error("invalid feedback action: {0}")]
    InvalidFeedbackAction(String),

    #[error("page size must be at least 1")]
    InvalidPageSize,
}
