//! Raw map payloads as returned by the game service.
//!
//! These are plain values; the published, reconciled views live in
//! [`crate::entity`].

use serde::{Deserialize, Serialize};

use crate::types::{EncounterId, FortId, SpeciesId};

/// A creature that can be encountered from the current position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPokemon {
    pub encounter_id: EncounterId,
    pub species: SpeciesId,
    /// Despawn time (Unix ms).
    pub expiration_timestamp_ms: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub spawn_point_id: String,
}

/// A creature close to the player, known only by rank and distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPokemon {
    pub encounter_id: EncounterId,
    pub species: SpeciesId,
    pub distance_in_meters: f32,
}

/// Kind of a fort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FortKind {
    Gym,
    Checkpoint,
}

/// A fort on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FortData {
    pub id: FortId,
    pub kind: FortKind,
    pub latitude: f64,
    pub longitude: f64,
    pub enabled: bool,
    /// Time after which the fort can be searched again (Unix ms).
    pub cooldown_complete_timestamp_ms: i64,
    /// Expiry of an active lure module, if any (Unix ms).
    pub lure_expires_timestamp_ms: Option<i64>,
    pub last_modified_timestamp_ms: i64,
}

/// One S2 cell worth of map objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapCell {
    pub s2_cell_id: u64,
    pub catchable_pokemons: Vec<MapPokemon>,
    pub nearby_pokemons: Vec<NearbyPokemon>,
    pub forts: Vec<FortData>,
}

/// Response to a map query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapObjects {
    pub map_cells: Vec<MapCell>,
}

impl MapObjects {
    /// All catchable creatures across cells, in cell order.
    pub fn catchable_pokemons(&self) -> Vec<MapPokemon> {
        self.map_cells
            .iter()
            .flat_map(|cell| cell.catchable_pokemons.iter().cloned())
            .collect()
    }

    /// All nearby creatures across cells, in cell order.
    pub fn nearby_pokemons(&self) -> Vec<NearbyPokemon> {
        self.map_cells
            .iter()
            .flat_map(|cell| cell.nearby_pokemons.iter().cloned())
            .collect()
    }

    /// Checkpoint forts across cells. Gyms are skipped.
    pub fn checkpoints(&self) -> Vec<FortData> {
        self.map_cells
            .iter()
            .flat_map(|cell| cell.forts.iter())
            .filter(|fort| fort.kind == FortKind::Checkpoint)
            .cloned()
            .collect()
    }
}

/// Outcome of an incense query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncenseResult {
    IncenseEncounterUnknown,
    IncenseEncounterAvailable,
    IncenseEncounterNotAvailable,
}

/// Response to an incense query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncenseEncounter {
    pub result: IncenseResult,
    pub encounter_id: EncounterId,
    pub species: SpeciesId,
    pub disappear_timestamp_ms: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub encounter_location: String,
}

impl IncenseEncounter {
    /// A response carrying no encounter.
    pub fn not_available() -> Self {
        Self {
            result: IncenseResult::IncenseEncounterNotAvailable,
            encounter_id: EncounterId(0),
            species: SpeciesId(0),
            disappear_timestamp_ms: 0,
            latitude: 0.0,
            longitude: 0.0,
            encounter_location: String::new(),
        }
    }

    /// Synthesize a catchable creature when an encounter is available.
    pub fn to_map_pokemon(&self) -> Option<MapPokemon> {
        if self.result != IncenseResult::IncenseEncounterAvailable {
            return None;
        }
        Some(MapPokemon {
            encounter_id: self.encounter_id,
            species: self.species,
            expiration_timestamp_ms: self.disappear_timestamp_ms,
            latitude: self.latitude,
            longitude: self.longitude,
            spawn_point_id: self.encounter_location.clone(),
        })
    }
}
