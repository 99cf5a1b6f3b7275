//! # pogo-live sync
//!
//! Keeps the published world state in step with the remote game service.
//!
//! ## Overview
//!
//! A [`SyncScheduler`] runs refresh cycles against a [`RemoteGameSession`]:
//!
//! 1. Report the current position
//! 2. Fetch map objects and the incense encounter
//! 3. Fetch the inventory and process it with [`InventoryProcessor`]
//! 4. Reconcile the published collections and broadcast [`SyncEvent`]s
//!
//! Every remote call goes through a [`RetryPolicy`]. An [`ExclusionGate`]
//! keeps timer ticks and forced refreshes from overlapping.
//!
//! ## Session
//!
//! The session is an abstract trait, so callers can plug in any RPC stack.
//! A scripted in-memory session is provided in [`session::memory`].

pub mod config;
pub mod error;
pub mod events;
pub mod gate;
pub mod inventory;
pub mod retry;
pub mod scheduler;
pub mod session;
pub mod world;

pub use config::{RetryConfig, SyncConfig};
pub use error::{Result, SessionError, SessionResult, SyncError};
pub use events::{CollectionKind, SyncEvent};
pub use gate::{ExclusionGate, GateGuard};
pub use inventory::{EggAssignment, InventoryProcessor, InventoryUpdate};
pub use retry::{RetryDecision, RetryPolicy, RetryingSession};
pub use scheduler::{SchedulerState, SyncScheduler, TickOutcome};
pub use session::RemoteGameSession;
pub use world::{MapFetch, WorldState, WorldView};
