//! Published map entities.
//!
//! Each entity wraps the raw value it was built from and exposes the
//! identity test used by reconciliation.

use serde::{Deserialize, Serialize};

use crate::map::{FortData, MapPokemon, NearbyPokemon};
use crate::reconcile::Updatable;
use crate::types::{EncounterId, FortId, SpeciesId};

/// A creature the player can encounter right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchableEntity {
    pub encounter_id: EncounterId,
    pub species: SpeciesId,
    /// Despawn time (Unix ms).
    pub expires_at_ms: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub spawn_point_id: String,
}

impl CatchableEntity {
    pub fn from_raw(raw: &MapPokemon) -> Self {
        Self {
            encounter_id: raw.encounter_id,
            species: raw.species,
            expires_at_ms: raw.expiration_timestamp_ms,
            latitude: raw.latitude,
            longitude: raw.longitude,
            spawn_point_id: raw.spawn_point_id.clone(),
        }
    }

    /// Identity test against a fetched value.
    pub fn is_same(&self, raw: &MapPokemon) -> bool {
        self.encounter_id == raw.encounter_id
    }
}

/// A creature in the proximity list.
///
/// The list order is meaningful, so the entry's slot is its rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityEntity {
    pub encounter_id: EncounterId,
    pub species: SpeciesId,
    pub distance_in_meters: f32,
}

impl ProximityEntity {
    pub fn from_raw(raw: &NearbyPokemon) -> Self {
        Self {
            encounter_id: raw.encounter_id,
            species: raw.species,
            distance_in_meters: raw.distance_in_meters,
        }
    }
}

impl Updatable<NearbyPokemon> for ProximityEntity {
    fn update(&mut self, raw: &NearbyPokemon) {
        self.encounter_id = raw.encounter_id;
        self.species = raw.species;
        self.distance_in_meters = raw.distance_in_meters;
    }
}

/// A visitable checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: FortId,
    pub latitude: f64,
    pub longitude: f64,
    pub enabled: bool,
    pub cooldown_complete_ms: i64,
    pub lure_expires_ms: Option<i64>,
    pub last_modified_ms: i64,
}

impl PointOfInterest {
    pub fn from_raw(raw: &FortData) -> Self {
        Self {
            id: raw.id.clone(),
            latitude: raw.latitude,
            longitude: raw.longitude,
            enabled: raw.enabled,
            cooldown_complete_ms: raw.cooldown_complete_timestamp_ms,
            lure_expires_ms: raw.lure_expires_timestamp_ms,
            last_modified_ms: raw.last_modified_timestamp_ms,
        }
    }

    /// Identity test against a fetched value.
    pub fn is_same(&self, raw: &FortData) -> bool {
        self.id == raw.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::FortKind;

    #[test]
    fn test_catchable_identity_ignores_payload() {
        let raw = MapPokemon {
            encounter_id: EncounterId(1),
            species: SpeciesId(16),
            expiration_timestamp_ms: 1_000,
            latitude: 1.0,
            longitude: 2.0,
            spawn_point_id: "s".into(),
        };
        let entity = CatchableEntity::from_raw(&raw);

        let mut moved = raw.clone();
        moved.latitude = 5.0;
        assert!(entity.is_same(&moved));
    }

    #[test]
    fn test_point_of_interest_identity_is_the_fort_id() {
        let raw = FortData {
            id: FortId::new("stop"),
            kind: FortKind::Checkpoint,
            latitude: 0.0,
            longitude: 0.0,
            enabled: true,
            cooldown_complete_timestamp_ms: 500,
            lure_expires_timestamp_ms: Some(2_000),
            last_modified_timestamp_ms: 0,
        };
        let poi = PointOfInterest::from_raw(&raw);

        assert_eq!(poi.cooldown_complete_ms, 500);
        assert_eq!(poi.lure_expires_ms, Some(2_000));

        let mut refreshed = raw.clone();
        refreshed.enabled = false;
        assert!(poi.is_same(&refreshed));
        refreshed.id = FortId::new("other");
        assert!(!poi.is_same(&refreshed));
    }
}
