//! In-memory implementation of the SettingsStore trait.
//!
//! Same semantics as the SQLite backend, nothing survives a drop.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{Result, SettingsError};
use crate::traits::{SettingsStore, DEFAULT_LAST_LEVEL_REWARD};

/// In-memory settings.
pub struct MemorySettings {
    inner: RwLock<MemorySettingsInner>,
}

#[derive(Debug, Clone, Default)]
struct MemorySettingsInner {
    auth_token: Option<String>,
    last_level_reward: Option<u32>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemorySettingsInner::default()),
        }
    }

    /// Start with a stored auth token.
    pub fn with_auth_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(MemorySettingsInner {
                auth_token: Some(token.into()),
                last_level_reward: None,
            }),
        }
    }

    fn read(&self) -> Result<MemorySettingsInner> {
        self.inner
            .read()
            .map(|inner| inner.clone())
            .map_err(|e| SettingsError::Poisoned(e.to_string()))
    }

    fn write<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut MemorySettingsInner),
    {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| SettingsError::Poisoned(e.to_string()))?;
        f(&mut inner);
        Ok(())
    }
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn auth_token(&self) -> Result<Option<String>> {
        Ok(self.read()?.auth_token)
    }

    async fn set_auth_token(&self, token: Option<String>) -> Result<()> {
        self.write(|inner| inner.auth_token = token)
    }

    async fn last_level_reward(&self) -> Result<u32> {
        Ok(self
            .read()?
            .last_level_reward
            .unwrap_or(DEFAULT_LAST_LEVEL_REWARD))
    }

    async fn set_last_level_reward(&self, level: u32) -> Result<()> {
        self.write(|inner| inner.last_level_reward = Some(level))
    }
}
