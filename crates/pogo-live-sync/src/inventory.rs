//! Inventory processing.
//!
//! Turns a fetched [`InventoryDelta`] into the published item list and
//! stats. On the first cycle of a session it also tends the incubators:
//! ready eggs are hatched and idle incubators get a free egg.

use std::collections::HashSet;

use tracing::{debug, info};

use pogo_live_core::{
    collapse_items, find_stats, AssignEggResult, HatchedEggs, IncubatorId, IncubatorPhase,
    InventoryDelta, ItemStack, PlayerStats, PokemonId,
};

use crate::error::Result;
use crate::events::SyncEvent;
use crate::retry::RetryingSession;
use crate::session::RemoteGameSession;
use crate::world::WorldState;

/// An egg placed in an incubator during processing.
#[derive(Debug, Clone, PartialEq)]
pub struct EggAssignment {
    pub incubator_id: IncubatorId,
    pub egg_id: PokemonId,
    pub result: AssignEggResult,
}

/// Result of processing one delta, ready to be published.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryUpdate {
    pub items: Vec<ItemStack>,
    pub stats: PlayerStats,
    pub hatched: Vec<HatchedEggs>,
    pub assigned: Vec<EggAssignment>,
}

impl InventoryUpdate {
    /// Publish into `world`: replace the item list, then the stats.
    pub fn apply(self, world: &mut WorldState) -> Vec<SyncEvent> {
        let mut events: Vec<SyncEvent> = self
            .hatched
            .into_iter()
            .filter(|hatched| !hatched.is_empty())
            .map(SyncEvent::EggHatched)
            .collect();
        events.extend(self.assigned.into_iter().map(|assignment| SyncEvent::EggAssigned {
            incubator_id: assignment.incubator_id,
            egg_id: assignment.egg_id,
            result: assignment.result,
        }));

        events.push(SyncEvent::InventoryReplaced {
            stacks: self.items.len(),
        });
        world.inventory = self.items;

        let fields = world.stats.replace(self.stats);
        events.push(SyncEvent::StatsChanged { fields });
        events
    }
}

/// Stateless delta processor.
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryProcessor;

impl InventoryProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Process `delta`.
    ///
    /// `bootstrap` is true while no stats have been published yet in this
    /// session; only then are incubators tended. A delta without a stats
    /// record is rejected before any remote call is made.
    pub async fn process<S: RemoteGameSession>(
        &self,
        session: &RetryingSession<S>,
        delta: &InventoryDelta,
        bootstrap: bool,
    ) -> Result<InventoryUpdate> {
        let items = collapse_items(delta);
        let stats = find_stats(delta)?.clone();

        let (hatched, assigned) = if bootstrap {
            self.tend_incubators(session, delta).await?
        } else {
            (Vec::new(), Vec::new())
        };

        debug!(
            stacks = items.len(),
            level = stats.level,
            bootstrap,
            "inventory processed"
        );

        Ok(InventoryUpdate {
            items,
            stats,
            hatched,
            assigned,
        })
    }

    async fn tend_incubators<S: RemoteGameSession>(
        &self,
        session: &RetryingSession<S>,
        delta: &InventoryDelta,
    ) -> Result<(Vec<HatchedEggs>, Vec<EggAssignment>)> {
        let mut hatched = Vec::new();
        let mut assigned = Vec::new();
        let mut claimed: HashSet<PokemonId> = HashSet::new();

        let incubators: Vec<_> = delta.incubators().collect();
        let mut phases: Vec<IncubatorPhase> =
            incubators.iter().map(|incubator| IncubatorPhase::of(incubator)).collect();

        for (index, incubator) in incubators.iter().enumerate() {
            match phases[index] {
                IncubatorPhase::ReadyToHatch => {
                    info!(incubator = %incubator.id.as_str(), "hatching egg");
                    hatched.push(session.hatch_egg().await?);
                    for phase in phases.iter_mut() {
                        *phase = phase.after_hatch();
                    }
                }
                IncubatorPhase::Hatched => {
                    debug!(incubator = %incubator.id.as_str(), "egg already hatched this pass");
                }
                IncubatorPhase::Idle => {
                    let egg = delta
                        .eggs()
                        .find(|egg| egg.is_free_egg() && !claimed.contains(&egg.id));
                    let Some(egg) = egg else {
                        debug!(incubator = %incubator.id.as_str(), "no free egg for idle incubator");
                        continue;
                    };
                    claimed.insert(egg.id);

                    info!(
                        incubator = %incubator.id.as_str(),
                        egg = egg.id.0,
                        "assigning egg to incubator"
                    );
                    let result = session.assign_egg_to_incubator(&incubator.id, egg.id).await?;
                    assigned.push(EggAssignment {
                        incubator_id: incubator.id.clone(),
                        egg_id: egg.id,
                        result,
                    });
                }
                IncubatorPhase::Incubating => {}
            }
        }

        Ok((hatched, assigned))
    }
}
