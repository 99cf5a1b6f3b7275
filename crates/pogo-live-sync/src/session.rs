//! Remote game session abstraction.
//!
//! The session is the authenticated connection to the game service. It
//! is owned by the caller; the scheduler only drives it. Implementations
//! may wrap any RPC stack.

use std::sync::Arc;

use async_trait::async_trait;

use pogo_live_core::{
    AssignEggResult, HatchedEggs, IncenseEncounter, IncubatorId, InventoryDelta, LevelUpRewards,
    MapObjects, PlayerProfile, PokemonId,
};

use crate::error::SessionResult;

/// Operations the synchronizer needs from the game service.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait RemoteGameSession: Send + Sync {
    /// Report the player's location. Subsequent queries are answered for it.
    async fn update_position(
        &self,
        latitude: f64,
        longitude: f64,
        altitude: f64,
    ) -> SessionResult<()>;

    /// Map cells around the last reported location.
    async fn fetch_map_objects(&self) -> SessionResult<MapObjects>;

    /// The incense encounter at the last reported location, if any.
    async fn fetch_incense_encounter(&self) -> SessionResult<IncenseEncounter>;

    /// The full inventory as a delta since the beginning of time.
    async fn fetch_inventory_delta(&self) -> SessionResult<InventoryDelta>;

    async fn fetch_profile(&self) -> SessionResult<PlayerProfile>;

    /// Rewards granted for reaching `level`.
    async fn fetch_level_rewards(&self, level: u32) -> SessionResult<LevelUpRewards>;

    async fn assign_egg_to_incubator(
        &self,
        incubator_id: &IncubatorId,
        egg_id: PokemonId,
    ) -> SessionResult<AssignEggResult>;

    /// Hatch every egg whose incubator reached its target.
    async fn hatch_egg(&self) -> SessionResult<HatchedEggs>;
}

#[async_trait]
impl<S: RemoteGameSession + ?Sized> RemoteGameSession for Arc<S> {
    async fn update_position(
        &self,
        latitude: f64,
        longitude: f64,
        altitude: f64,
    ) -> SessionResult<()> {
        (**self).update_position(latitude, longitude, altitude).await
    }

    async fn fetch_map_objects(&self) -> SessionResult<MapObjects> {
        (**self).fetch_map_objects().await
    }

    async fn fetch_incense_encounter(&self) -> SessionResult<IncenseEncounter> {
        (**self).fetch_incense_encounter().await
    }

    async fn fetch_inventory_delta(&self) -> SessionResult<InventoryDelta> {
        (**self).fetch_inventory_delta().await
    }

    async fn fetch_profile(&self) -> SessionResult<PlayerProfile> {
        (**self).fetch_profile().await
    }

    async fn fetch_level_rewards(&self, level: u32) -> SessionResult<LevelUpRewards> {
        (**self).fetch_level_rewards(level).await
    }

    async fn assign_egg_to_incubator(
        &self,
        incubator_id: &IncubatorId,
        egg_id: PokemonId,
    ) -> SessionResult<AssignEggResult> {
        (**self).assign_egg_to_incubator(incubator_id, egg_id).await
    }

    async fn hatch_egg(&self) -> SessionResult<HatchedEggs> {
        (**self).hatch_egg().await
    }
}

/// A scripted in-memory session for testing.
///
/// Every call is recorded. Responses come from fixed values set up front;
/// failures queued with [`MemorySession::fail_next`] are consumed by the
/// next calls, whatever the operation.
pub mod memory {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    use pogo_live_core::{AssignEggStatus, RewardsResult};

    use crate::error::SessionError;

    /// One recorded call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum SessionCall {
        UpdatePosition {
            latitude: f64,
            longitude: f64,
            altitude: f64,
        },
        FetchMapObjects,
        FetchIncenseEncounter,
        FetchInventoryDelta,
        FetchProfile,
        FetchLevelRewards(u32),
        AssignEgg {
            incubator_id: IncubatorId,
            egg_id: PokemonId,
        },
        HatchEgg,
    }

    struct Script {
        map_objects: MapObjects,
        incense: IncenseEncounter,
        inventory: InventoryDelta,
        profile: PlayerProfile,
        rewards: HashMap<u32, LevelUpRewards>,
        assign_status: AssignEggStatus,
        hatched: HatchedEggs,
        failures: VecDeque<SessionError>,
        map_latency: Option<Duration>,
        calls: Vec<SessionCall>,
    }

    /// In-memory session implementation.
    pub struct MemorySession {
        script: Mutex<Script>,
    }

    impl MemorySession {
        /// A session answering with an empty world and inventory.
        pub fn new() -> Self {
            Self {
                script: Mutex::new(Script {
                    map_objects: MapObjects::default(),
                    incense: IncenseEncounter::not_available(),
                    inventory: InventoryDelta::default(),
                    profile: PlayerProfile::default(),
                    rewards: HashMap::new(),
                    assign_status: AssignEggStatus::Success,
                    hatched: HatchedEggs::default(),
                    failures: VecDeque::new(),
                    map_latency: None,
                    calls: Vec::new(),
                }),
            }
        }

        fn script(&self) -> std::sync::MutexGuard<'_, Script> {
            self.script
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        }

        pub fn set_map_objects(&self, map_objects: MapObjects) {
            self.script().map_objects = map_objects;
        }

        pub fn set_incense(&self, incense: IncenseEncounter) {
            self.script().incense = incense;
        }

        pub fn set_inventory(&self, inventory: InventoryDelta) {
            self.script().inventory = inventory;
        }

        pub fn set_profile(&self, profile: PlayerProfile) {
            self.script().profile = profile;
        }

        pub fn set_level_rewards(&self, level: u32, rewards: LevelUpRewards) {
            self.script().rewards.insert(level, rewards);
        }

        pub fn set_assign_status(&self, status: AssignEggStatus) {
            self.script().assign_status = status;
        }

        pub fn set_hatched(&self, hatched: HatchedEggs) {
            self.script().hatched = hatched;
        }

        /// Delay every map fetch by `latency`.
        pub fn set_map_latency(&self, latency: Duration) {
            self.script().map_latency = Some(latency);
        }

        /// Fail the next `count` calls with `error`.
        pub fn fail_next(&self, count: usize, error: SessionError) {
            let mut script = self.script();
            for _ in 0..count {
                script.failures.push_back(error.clone());
            }
        }

        pub fn calls(&self) -> Vec<SessionCall> {
            self.script().calls.clone()
        }

        /// Number of recorded calls matching `predicate`.
        pub fn count_calls(&self, predicate: impl Fn(&SessionCall) -> bool) -> usize {
            self.script().calls.iter().filter(|call| predicate(call)).count()
        }

        pub fn clear_calls(&self) {
            self.script().calls.clear();
        }

        fn record(&self, call: SessionCall) -> SessionResult<()> {
            let mut script = self.script();
            script.calls.push(call);
            match script.failures.pop_front() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    impl Default for MemorySession {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl RemoteGameSession for MemorySession {
        async fn update_position(
            &self,
            latitude: f64,
            longitude: f64,
            altitude: f64,
        ) -> SessionResult<()> {
            self.record(SessionCall::UpdatePosition {
                latitude,
                longitude,
                altitude,
            })
        }

        async fn fetch_map_objects(&self) -> SessionResult<MapObjects> {
            let latency = self.script().map_latency;
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            self.record(SessionCall::FetchMapObjects)?;
            Ok(self.script().map_objects.clone())
        }

        async fn fetch_incense_encounter(&self) -> SessionResult<IncenseEncounter> {
            self.record(SessionCall::FetchIncenseEncounter)?;
            Ok(self.script().incense.clone())
        }

        async fn fetch_inventory_delta(&self) -> SessionResult<InventoryDelta> {
            self.record(SessionCall::FetchInventoryDelta)?;
            Ok(self.script().inventory.clone())
        }

        async fn fetch_profile(&self) -> SessionResult<PlayerProfile> {
            self.record(SessionCall::FetchProfile)?;
            Ok(self.script().profile.clone())
        }

        async fn fetch_level_rewards(&self, level: u32) -> SessionResult<LevelUpRewards> {
            self.record(SessionCall::FetchLevelRewards(level))?;
            let rewards = self.script().rewards.get(&level).cloned();
            Ok(rewards.unwrap_or(LevelUpRewards {
                result: RewardsResult::AwardedAlready,
                items_awarded: Vec::new(),
                items_unlocked: Vec::new(),
            }))
        }

        async fn assign_egg_to_incubator(
            &self,
            incubator_id: &IncubatorId,
            egg_id: PokemonId,
        ) -> SessionResult<AssignEggResult> {
            self.record(SessionCall::AssignEgg {
                incubator_id: incubator_id.clone(),
                egg_id,
            })?;
            Ok(AssignEggResult {
                status: self.script().assign_status,
                incubator: None,
            })
        }

        async fn hatch_egg(&self) -> SessionResult<HatchedEggs> {
            self.record(SessionCall::HatchEgg)?;
            Ok(self.script().hatched.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::{MemorySession, SessionCall};
    use super::*;
    use crate::error::SessionError;

    #[tokio::test]
    async fn test_memory_session_records_calls() {
        let session = MemorySession::new();

        session.update_position(1.0, 2.0, 3.0).await.unwrap();
        session.fetch_map_objects().await.unwrap();

        assert_eq!(
            session.calls(),
            vec![
                SessionCall::UpdatePosition {
                    latitude: 1.0,
                    longitude: 2.0,
                    altitude: 3.0,
                },
                SessionCall::FetchMapObjects,
            ]
        );
    }

    #[tokio::test]
    async fn test_memory_session_queued_failures() {
        let session = MemorySession::new();
        session.fail_next(2, SessionError::Transport("down".into()));

        assert!(session.fetch_profile().await.is_err());
        assert!(session.fetch_inventory_delta().await.is_err());
        assert!(session.hatch_egg().await.is_ok());
        assert_eq!(session.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_shared_session_through_arc() {
        let session = Arc::new(MemorySession::new());
        let shared: Arc<MemorySession> = Arc::clone(&session);

        shared.fetch_level_rewards(5).await.unwrap();

        assert_eq!(
            session.count_calls(|call| matches!(call, SessionCall::FetchLevelRewards(5))),
            1
        );
    }
}
