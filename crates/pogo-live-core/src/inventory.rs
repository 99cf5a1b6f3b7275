//! Inventory delta records and the pure parts of inventory processing.
//!
//! A delta is a flat list of heterogeneous records. The helpers here
//! collapse item stacks, locate the stats record and classify incubators;
//! anything that talks to the service lives in the sync crate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::stats::PlayerStats;
use crate::types::{IncubatorId, ItemKind, PokemonId, SpeciesId};

/// A stack of identical items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub count: u32,
    pub unseen: bool,
}

impl ItemStack {
    pub fn new(kind: ItemKind, count: u32) -> Self {
        Self {
            kind,
            count,
            unseen: false,
        }
    }
}

/// An egg incubator owned by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EggIncubator {
    pub id: IncubatorId,
    pub item_kind: ItemKind,
    /// Egg currently inside, if any.
    pub pokemon_id: Option<PokemonId>,
    pub start_km_walked: f64,
    pub target_km_walked: f64,
    /// Remaining uses; `None` for unlimited incubators.
    pub uses_remaining: Option<u32>,
}

/// Lifecycle of an incubator as inferred from server-reported distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncubatorPhase {
    /// Nothing accumulated yet.
    Idle,
    /// Walking towards the target.
    Incubating,
    /// Walked distance reached the target.
    ReadyToHatch,
    /// Hatch requested; the incubator left the candidate pool.
    Hatched,
}

impl IncubatorPhase {
    /// Classify an incubator. Never returns `Hatched`; see
    /// [`IncubatorPhase::after_hatch`].
    pub fn of(incubator: &EggIncubator) -> Self {
        if incubator.start_km_walked.abs() <= 0.0 {
            IncubatorPhase::Idle
        } else if incubator.start_km_walked >= incubator.target_km_walked {
            IncubatorPhase::ReadyToHatch
        } else {
            IncubatorPhase::Incubating
        }
    }

    /// Phase after a hatch request. One request hatches every ready egg,
    /// so each ready incubator leaves the candidate pool.
    pub fn after_hatch(self) -> Self {
        match self {
            IncubatorPhase::ReadyToHatch => IncubatorPhase::Hatched,
            other => other,
        }
    }
}

/// A pokemon (or egg) owned by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: PokemonId,
    pub species: SpeciesId,
    pub is_egg: bool,
    /// Incubator holding this egg, if any.
    pub egg_incubator_id: Option<IncubatorId>,
    pub egg_km_walked_target: f64,
}

impl PokemonRecord {
    /// An egg not yet placed in any incubator.
    pub fn is_free_egg(&self) -> bool {
        self.is_egg
            && self
                .egg_incubator_id
                .as_ref()
                .map_or(true, |id| id.as_str().trim().is_empty())
    }
}

/// One record of an inventory delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryRecord {
    Item(ItemStack),
    EggIncubators(Vec<EggIncubator>),
    Pokemon(PokemonRecord),
    PlayerStats(PlayerStats),
}

/// Response to an inventory query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryDelta {
    pub original_timestamp_ms: i64,
    pub new_timestamp_ms: i64,
    pub records: Vec<InventoryRecord>,
}

impl InventoryDelta {
    pub fn items(&self) -> impl Iterator<Item = &ItemStack> {
        self.records.iter().filter_map(|record| match record {
            InventoryRecord::Item(item) => Some(item),
            _ => None,
        })
    }

    /// Incubators across all incubator records, in delta order.
    pub fn incubators(&self) -> impl Iterator<Item = &EggIncubator> {
        self.records
            .iter()
            .filter_map(|record| match record {
                InventoryRecord::EggIncubators(list) => Some(list.iter()),
                _ => None,
            })
            .flatten()
    }

    pub fn pokemons(&self) -> impl Iterator<Item = &PokemonRecord> {
        self.records.iter().filter_map(|record| match record {
            InventoryRecord::Pokemon(pokemon) => Some(pokemon),
            _ => None,
        })
    }

    pub fn eggs(&self) -> impl Iterator<Item = &PokemonRecord> {
        self.pokemons().filter(|pokemon| pokemon.is_egg)
    }
}

/// One stack per item kind, first occurrence wins, order of first
/// appearance kept.
pub fn collapse_items(delta: &InventoryDelta) -> Vec<ItemStack> {
    let mut seen = HashSet::new();
    delta
        .items()
        .filter(|item| seen.insert(item.kind))
        .cloned()
        .collect()
}

/// The stats record of a delta.
///
/// Every delta must carry one; its absence is a protocol error.
pub fn find_stats(delta: &InventoryDelta) -> Result<&PlayerStats> {
    delta
        .records
        .iter()
        .find_map(|record| match record {
            InventoryRecord::PlayerStats(stats) => Some(stats),
            _ => None,
        })
        .ok_or(CoreError::MissingRecord("player_stats"))
}
