//! SQLite implementation of the SettingsStore trait.
//!
//! Values are CBOR-encoded into a single key/value table. Every access
//! runs on the blocking pool so the async runtime never waits on disk.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SettingsError};
use crate::migration::{self, now_millis};
use crate::traits::{SettingsStore, DEFAULT_LAST_LEVEL_REWARD};

const KEY_AUTH_TOKEN: &str = "auth_token";
const KEY_LAST_LEVEL_REWARD: &str = "last_level_reward";

/// SQLite-backed settings.
///
/// Thread-safe via internal Mutex.
#[derive(Clone)]
pub struct SqliteSettings {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSettings {
    /// Open (or create) a settings database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| SettingsError::Poisoned(e.to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| SettingsError::Task(e.to_string()))?
    }

    async fn get_value<T>(&self, key: &'static str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.with_conn(move |conn| {
            let raw: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT value FROM settings WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;

            raw.map(|bytes| {
                ciborium::from_reader(bytes.as_slice())
                    .map_err(|e| SettingsError::Serialization(e.to_string()))
            })
            .transpose()
        })
        .await
    }

    async fn put_value<T>(&self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, buf, now_millis()],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete_value(&self, key: &'static str) -> Result<()> {
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl SettingsStore for SqliteSettings {
    async fn auth_token(&self) -> Result<Option<String>> {
        self.get_value(KEY_AUTH_TOKEN).await
    }

    async fn set_auth_token(&self, token: Option<String>) -> Result<()> {
        match token {
            Some(token) => self.put_value(KEY_AUTH_TOKEN, &token).await,
            None => self.delete_value(KEY_AUTH_TOKEN).await,
        }
    }

    async fn last_level_reward(&self) -> Result<u32> {
        Ok(self
            .get_value(KEY_LAST_LEVEL_REWARD)
            .await?
            .unwrap_or(DEFAULT_LAST_LEVEL_REWARD))
    }

    async fn set_last_level_reward(&self, level: u32) -> Result<()> {
        self.put_value(KEY_LAST_LEVEL_REWARD, &level).await
    }
}
