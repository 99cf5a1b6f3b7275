//! Client configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use pogo_live_settings::SqliteSettings;
use pogo_live_sync::SyncConfig;

use crate::error::Result;

/// Configuration for a [`GameClient`](crate::GameClient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub sync: SyncConfig,

    /// SQLite file holding persisted settings; in memory when unset.
    pub settings_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Open the settings store this configuration points at.
    pub fn open_settings(&self) -> Result<SqliteSettings> {
        let settings = match &self.settings_path {
            Some(path) => SqliteSettings::open(path)?,
            None => SqliteSettings::open_memory()?,
        };
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_from_json_defaults() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.sync.refresh_interval_secs, 10);
        assert!(config.settings_path.is_none());
    }

    #[test]
    fn test_from_json_overrides() {
        let config = ClientConfig::from_json(
            r#"{ "sync": { "retry": { "max_retries": 5 } }, "settings_path": "/tmp/pogo.db" }"#,
        )
        .unwrap();

        assert_eq!(config.sync.retry.max_retries, 5);
        assert_eq!(config.sync.retry.delay_ms, 500);
        assert_eq!(config.settings_path, Some(PathBuf::from("/tmp/pogo.db")));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            ClientConfig::from_json("{ not json"),
            Err(ClientError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_open_settings_on_disk() {
        use pogo_live_settings::SettingsStore;

        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            settings_path: Some(dir.path().join("settings.db")),
            ..Default::default()
        };

        let settings = config.open_settings().unwrap();
        settings.set_last_level_reward(4).await.unwrap();

        let reopened = config.open_settings().unwrap();
        assert_eq!(reopened.last_level_reward().await.unwrap(), 4);
    }
}
