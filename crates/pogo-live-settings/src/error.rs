//! Error types for the settings module.

use thiserror::Error;

/// Errors that can occur while reading or writing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Value encoding/decoding error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// The connection mutex was poisoned by a panicking writer.
    #[error("settings lock poisoned: {0}")]
    Poisoned(String),

    /// The blocking worker failed.
    #[error("blocking task failed: {0}")]
    Task(String),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
