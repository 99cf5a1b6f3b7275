//! Retry policy for remote calls.
//!
//! Every call to the game service goes through [`RetryingSession`]. A
//! transient failure bumps a shared counter of consecutive failures and
//! the call is retried after a fixed pause; once the counter reaches the
//! ceiling the call is abandoned and the caller has to log in again. Any
//! success resets the counter.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{error, warn};

use pogo_live_core::{
    AssignEggResult, HatchedEggs, IncenseEncounter, IncubatorId, InventoryDelta, LevelUpRewards,
    MapObjects, PlayerProfile, PokemonId,
};

use crate::config::RetryConfig;
use crate::error::{Result, SessionResult, SyncError};
use crate::session::RemoteGameSession;

/// What to do after a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Try again once the pause has elapsed.
    Retry { after: Duration },
    /// Give up; `attempts` consecutive failures were seen.
    Abort { attempts: u32 },
}

/// Counter of consecutive failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    consecutive_failures: u32,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            consecutive_failures: 0,
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Record a failure.
    ///
    /// The counter is not cleared on abort; only a success or an
    /// explicit [`reset`](Self::reset) does that.
    pub fn on_failure(&mut self) -> RetryDecision {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.consecutive_failures < self.config.max_retries {
            RetryDecision::Retry {
                after: self.config.delay(),
            }
        } else {
            RetryDecision::Abort {
                attempts: self.consecutive_failures,
            }
        }
    }

    pub fn on_success(&mut self) {
        self.consecutive_failures = 0;
    }

    pub fn reset(&mut self) {
        self.consecutive_failures = 0;
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

/// A session whose calls are retried under a shared [`RetryPolicy`].
pub struct RetryingSession<S> {
    inner: S,
    policy: Mutex<RetryPolicy>,
}

impl<S: RemoteGameSession> RetryingSession<S> {
    pub fn new(inner: S, config: RetryConfig) -> Self {
        Self {
            inner,
            policy: Mutex::new(RetryPolicy::new(config)),
        }
    }

    /// The wrapped session.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.policy().consecutive_failures()
    }

    /// Forget past failures, e.g. after a new login.
    pub fn reset(&self) {
        self.policy().reset();
    }

    // The counter is plain data, a poisoned lock is still usable.
    fn policy(&self) -> MutexGuard<'_, RetryPolicy> {
        self.policy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn call<T, F, Fut>(&self, operation: &'static str, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = SessionResult<T>>,
    {
        loop {
            let err = match attempt().await {
                Ok(value) => {
                    self.policy().on_success();
                    return Ok(value);
                }
                Err(err) => err,
            };

            if !err.is_transient() {
                return Err(SyncError::Session {
                    operation,
                    source: err,
                });
            }

            let decision = self.policy().on_failure();
            match decision {
                RetryDecision::Retry { after } => {
                    warn!(operation, error = %err, "remote call failed, retrying");
                    tokio::time::sleep(after).await;
                }
                RetryDecision::Abort { attempts } => {
                    error!(operation, attempts, error = %err, "giving up on remote call");
                    return Err(SyncError::RetriesExhausted {
                        operation,
                        attempts,
                        source: err,
                    });
                }
            }
        }
    }

    pub async fn update_position(&self, latitude: f64, longitude: f64, altitude: f64) -> Result<()> {
        self.call("update_position", || {
            self.inner.update_position(latitude, longitude, altitude)
        })
        .await
    }

    pub async fn fetch_map_objects(&self) -> Result<MapObjects> {
        self.call("fetch_map_objects", || self.inner.fetch_map_objects())
            .await
    }

    pub async fn fetch_incense_encounter(&self) -> Result<IncenseEncounter> {
        self.call("fetch_incense_encounter", || {
            self.inner.fetch_incense_encounter()
        })
        .await
    }

    pub async fn fetch_inventory_delta(&self) -> Result<InventoryDelta> {
        self.call("fetch_inventory_delta", || self.inner.fetch_inventory_delta())
            .await
    }

    pub async fn fetch_profile(&self) -> Result<PlayerProfile> {
        self.call("fetch_profile", || self.inner.fetch_profile()).await
    }

    pub async fn fetch_level_rewards(&self, level: u32) -> Result<LevelUpRewards> {
        self.call("fetch_level_rewards", || self.inner.fetch_level_rewards(level))
            .await
    }

    pub async fn assign_egg_to_incubator(
        &self,
        incubator_id: &IncubatorId,
        egg_id: PokemonId,
    ) -> Result<AssignEggResult> {
        self.call("assign_egg_to_incubator", || {
            self.inner.assign_egg_to_incubator(incubator_id, egg_id)
        })
        .await
    }

    pub async fn hatch_egg(&self) -> Result<HatchedEggs> {
        self.call("hatch_egg", || self.inner.hatch_egg()).await
    }
}
