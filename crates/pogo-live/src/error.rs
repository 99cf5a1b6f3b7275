//! Error types for the client.

use pogo_live_settings::SettingsError;
use pogo_live_sync::SyncError;
use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Sync error.
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),

    /// Settings storage error.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The client has no player data yet.
    #[error("player level unknown until the first refresh completes")]
    LevelUnknown,
}

impl ClientError {
    /// Whether the caller has to log in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::Sync(err) if err.requires_login())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
