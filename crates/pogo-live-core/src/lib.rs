//! # pogo-live core
//!
//! Pure primitives for the live world-state synchronizer: entities seen on
//! the map, inventory records, player stats, and the reconciliation
//! algorithms that merge a fresh fetch into a published collection.
//!
//! This crate contains no I/O, no timers, no networking. It is pure
//! computation over values returned by the remote game service.
//!
//! ## Key Types
//!
//! - [`ObservableCollection`] - An ordered collection that records every change
//! - [`CatchableEntity`], [`ProximityEntity`], [`PointOfInterest`] - Published map entities
//! - [`InventoryDelta`] - Raw inventory payload, see [`inventory`]
//! - [`StatsSnapshot`] - Player stats with field-level change notification
//!
//! ## Reconciliation
//!
//! Two strategies live in [`reconcile`]:
//!
//! - [`update_with`] keeps entries by identity (set semantics)
//! - [`update_by_index_with`] keeps entries by slot (ordered semantics)

pub mod entity;
pub mod error;
pub mod inventory;
pub mod map;
pub mod observable;
pub mod player;
pub mod position;
pub mod reconcile;
pub mod stats;
pub mod types;

pub use entity::{CatchableEntity, PointOfInterest, ProximityEntity};
pub use error::{CoreError, Result};
pub use inventory::{
    collapse_items, find_stats, EggIncubator, IncubatorPhase, InventoryDelta, InventoryRecord,
    ItemStack, PokemonRecord,
};
pub use map::{
    FortData, FortKind, IncenseEncounter, IncenseResult, MapCell, MapObjects, MapPokemon,
    NearbyPokemon,
};
pub use observable::{CollectionChange, ObservableCollection};
pub use player::{
    AssignEggResult, AssignEggStatus, Currency, HatchedEggs, ItemAward, LevelUpRewards, PlayerProfile,
    RewardsResult,
};
pub use position::Position;
pub use reconcile::{update_by_index_with, update_with, Updatable};
pub use stats::{PlayerStats, StatField, StatsSnapshot};
pub use types::{EncounterId, FortId, IncubatorId, ItemKind, PokemonId, SpeciesId};
