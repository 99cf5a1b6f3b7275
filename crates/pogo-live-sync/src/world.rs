//! Published world state.
//!
//! Mutated only by the cycle holding the exclusion gate. Readers take a
//! [`WorldView`] snapshot instead of holding the lock.

use pogo_live_core::{
    update_by_index_with, update_with, CatchableEntity, FortData, ItemStack, MapPokemon,
    NearbyPokemon, ObservableCollection, PlayerStats, PointOfInterest, Position, ProximityEntity,
    StatsSnapshot,
};

use crate::events::{CollectionKind, SyncEvent};

/// Everything a consumer can observe, owned by the scheduler.
#[derive(Debug, Default)]
pub struct WorldState {
    pub catchables: ObservableCollection<CatchableEntity>,
    pub proximity: ObservableCollection<ProximityEntity>,
    pub points_of_interest: ObservableCollection<PointOfInterest>,
    pub inventory: Vec<ItemStack>,
    pub stats: StatsSnapshot,
}

/// Fresh map data gathered by one cycle.
#[derive(Debug, Clone, Default)]
pub struct MapFetch {
    pub catchables: Vec<MapPokemon>,
    pub nearby: Vec<NearbyPokemon>,
    pub checkpoints: Vec<FortData>,
}

impl WorldState {
    /// Reconcile the three map collections and report what changed.
    ///
    /// `NewFindings` compares the fetched catchable count, duplicates
    /// included, against the published count before reconciliation.
    pub fn apply_map(&mut self, fetch: &MapFetch) -> Vec<SyncEvent> {
        let previous_catchables = self.catchables.len();
        let previous_nearby = self.proximity.len();

        update_with(
            &mut self.catchables,
            &fetch.catchables,
            CatchableEntity::from_raw,
            CatchableEntity::is_same,
        );
        update_by_index_with(&mut self.proximity, &fetch.nearby, ProximityEntity::from_raw);
        update_with(
            &mut self.points_of_interest,
            &fetch.checkpoints,
            PointOfInterest::from_raw,
            PointOfInterest::is_same,
        );

        let mut events = Vec::new();
        if fetch.catchables.len() != previous_catchables {
            events.push(SyncEvent::NewFindings {
                count: fetch.catchables.len(),
            });
        }
        if self.proximity.len() != previous_nearby {
            events.push(SyncEvent::NearbyCountChanged {
                previous: previous_nearby,
                current: self.proximity.len(),
            });
        }
        events.extend(self.drain_changes());
        events
    }

    /// Empty every collection and forget inventory and stats.
    pub fn clear(&mut self) -> Vec<SyncEvent> {
        self.catchables.clear();
        self.proximity.clear();
        self.points_of_interest.clear();
        self.inventory.clear();
        self.stats.reset();
        self.drain_changes()
    }

    fn drain_changes(&mut self) -> Vec<SyncEvent> {
        [
            (CollectionKind::Catchables, self.catchables.take_changes()),
            (CollectionKind::Proximity, self.proximity.take_changes()),
            (
                CollectionKind::PointsOfInterest,
                self.points_of_interest.take_changes(),
            ),
        ]
        .into_iter()
        .filter(|(_, changes)| !changes.is_empty())
        .map(|(collection, changes)| SyncEvent::CollectionChanged {
            collection,
            changes,
        })
        .collect()
    }

    pub fn view(&self, position: Option<Position>) -> WorldView {
        WorldView {
            position,
            catchables: self.catchables.snapshot(),
            proximity: self.proximity.snapshot(),
            points_of_interest: self.points_of_interest.snapshot(),
            inventory: self.inventory.clone(),
            stats: self.stats.stats().clone(),
        }
    }
}

/// A point-in-time copy of the published state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldView {
    pub position: Option<Position>,
    pub catchables: Vec<CatchableEntity>,
    pub proximity: Vec<ProximityEntity>,
    pub points_of_interest: Vec<PointOfInterest>,
    pub inventory: Vec<ItemStack>,
    pub stats: PlayerStats,
}
