//! # pogo-live
//!
//! Live world-state synchronizer for a location-based game client.
//!
//! ## Overview
//!
//! While a player is logged in, the synchronizer keeps a local picture of
//! the game world in step with the remote service:
//!
//! - **Map**: catchable creatures, the proximity list and checkpoints
//! - **Inventory**: item stacks, collapsed one per kind
//! - **Stats**: the player's level and counters
//! - **Eggs**: hatched and placed in incubators on the first refresh
//!
//! Refreshes run on a timer, on demand, and once when sync starts. Every
//! change is broadcast as a [`SyncEvent`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pogo_live::{ClientConfig, GameClient, Position};
//! use pogo_live::settings::MemorySettings;
//! use pogo_live::sync::session::memory::MemorySession;
//!
//! async fn example() {
//!     let client = GameClient::new(
//!         MemorySession::new(),
//!         MemorySettings::new(),
//!         ClientConfig::default(),
//!     );
//!
//!     let (fixes, sensor) = tokio::sync::mpsc::channel(16);
//!     fixes.send(Position::new(45.07, 7.68, 240.0)).await.unwrap();
//!     client.start(sensor).await.unwrap();
//!
//!     for rewards in client.claim_level_rewards().await.unwrap() {
//!         println!("{}\n{}", rewards.title(), rewards.summary());
//!     }
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `pogo_live::core` - World entities, inventory and reconciliation
//! - `pogo_live::settings` - Persisted settings
//! - `pogo_live::sync` - Scheduler, retry policy and session trait

pub mod client;
pub mod config;
pub mod error;
pub mod rewards;

// Re-export component crates
pub use pogo_live_core as core;
pub use pogo_live_settings as settings;
pub use pogo_live_sync as sync;

// Re-export main types for convenience
pub use client::GameClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use rewards::{claim_level_rewards, LevelRewards};

pub use pogo_live_core::{
    CatchableEntity, ItemKind, ItemStack, PlayerProfile, PlayerStats, PointOfInterest, Position,
    ProximityEntity,
};
pub use pogo_live_sync::{
    RemoteGameSession, SchedulerState, SessionError, SyncConfig, SyncError, SyncEvent, TickOutcome,
    WorldView,
};
