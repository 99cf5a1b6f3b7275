//! # pogo-live settings
//!
//! Persisted client settings. The synchronizer itself never touches them;
//! the facade reads and writes them around login, logout and level-up.
//!
//! ## Key Types
//!
//! - [`SettingsStore`] - The async trait for all settings access
//! - [`SqliteSettings`] - SQLite-backed persistent settings
//! - [`MemorySettings`] - In-memory settings for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pogo_live_settings::{SettingsStore, SqliteSettings};
//!
//! async fn example() {
//!     let settings = SqliteSettings::open("settings.db").unwrap();
//!
//!     settings.set_auth_token(Some("token".into())).await.unwrap();
//!     let level = settings.last_level_reward().await.unwrap();
//!     assert!(level >= 1);
//! }
//! ```

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, SettingsError};
pub use memory::MemorySettings;
pub use sqlite::SqliteSettings;
pub use traits::{SettingsStore, DEFAULT_LAST_LEVEL_REWARD};
