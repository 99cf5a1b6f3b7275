//! Error types for the sync crate.

use thiserror::Error;

use pogo_live_core::CoreError;

/// Failure of a single call to the remote game service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Network-level failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered but could not serve the request right now.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The session token was rejected.
    #[error("session not authenticated")]
    Unauthenticated,

    /// The response could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl SessionError {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, SessionError::Transport(_) | SessionError::Unavailable(_))
    }
}

/// Result type for remote session calls.
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Errors that end a refresh cycle or a scheduler operation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The retry ceiling was reached; the session must be re-established.
    #[error("{operation} failed after {attempts} consecutive attempts: {source}")]
    RetriesExhausted {
        operation: &'static str,
        attempts: u32,
        source: SessionError,
    },

    /// A call failed with an error retrying cannot fix.
    #[error("{operation} failed: {source}")]
    Session {
        operation: &'static str,
        source: SessionError,
    },

    /// A response broke a protocol guarantee.
    #[error("protocol error: {0}")]
    Protocol(#[from] CoreError),

    /// A cycle ran before any position fix was known.
    #[error("no position fix available")]
    NoPosition,

    /// The position stream ended before delivering a fix.
    #[error("position stream closed")]
    SensorClosed,

    /// The operation is not valid in the scheduler's current state.
    #[error("invalid scheduler state: {0}")]
    InvalidState(String),
}

impl SyncError {
    /// Whether the caller has to log in again before syncing resumes.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            SyncError::RetriesExhausted { .. }
                | SyncError::Session {
                    source: SessionError::Unauthenticated,
                    ..
                }
        )
    }
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(SessionError::Transport("reset".into()).is_transient());
        assert!(SessionError::Unavailable("busy".into()).is_transient());
        assert!(!SessionError::Unauthenticated.is_transient());
        assert!(!SessionError::Malformed("truncated".into()).is_transient());
    }

    #[test]
    fn test_requires_login() {
        let exhausted = SyncError::RetriesExhausted {
            operation: "fetch_map_objects",
            attempts: 50,
            source: SessionError::Transport("timeout".into()),
        };
        assert!(exhausted.requires_login());
        assert!(exhausted.to_string().contains("50 consecutive attempts"));

        let rejected = SyncError::Session {
            operation: "fetch_inventory_delta",
            source: SessionError::Unauthenticated,
        };
        assert!(rejected.requires_login());

        assert!(!SyncError::NoPosition.requires_login());
    }
}
