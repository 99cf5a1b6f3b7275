//! Error types for pogo-live core.

use thiserror::Error;

/// Errors raised while interpreting data returned by the game service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A record that must be present in every payload was absent.
    #[error("missing expected record: {0}")]
    MissingRecord(&'static str),

    /// A collection index was out of range.
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
