//! SettingsStore trait: the abstract interface for persisted settings.

use async_trait::async_trait;

use crate::error::Result;

/// Level assumed acknowledged when nothing was stored yet.
///
/// Level 1 grants no rewards, so claiming starts at level 2.
pub const DEFAULT_LAST_LEVEL_REWARD: u32 = 1;

/// Async interface for the settings the client persists between runs.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Stored auth token of the last session, if any.
    async fn auth_token(&self) -> Result<Option<String>>;

    /// Store or clear the auth token.
    async fn set_auth_token(&self, token: Option<String>) -> Result<()>;

    /// Highest level whose rewards were already claimed.
    ///
    /// Defaults to [`DEFAULT_LAST_LEVEL_REWARD`].
    async fn last_level_reward(&self) -> Result<u32>;

    /// Record that rewards up to `level` were claimed.
    async fn set_last_level_reward(&self, level: u32) -> Result<()>;
}
