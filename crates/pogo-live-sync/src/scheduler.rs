//! Refresh scheduling.
//!
//! The scheduler owns the published [`WorldState`] and keeps it in step
//! with the game service. Three sources can start a refresh cycle: the
//! periodic timer, an explicit [`SyncScheduler::force_refresh`], and the
//! initial cycle run by [`SyncScheduler::prime`]. An [`ExclusionGate`]
//! guarantees at most one cycle runs at a time; a trigger that finds the
//! gate closed is dropped, never queued.
//!
//! ## States
//!
//! ```text
//! Uninitialized --prime--> Priming --first cycle ok--> Idle <--> Refreshing
//!       ^                     |                          |
//!       |                     +------ failure -----------+--> Stopped
//!       +------------------------- logout / prime -------------+
//! ```
//!
//! Every logout starts a new epoch. A cycle or priming run remembers the
//! epoch it started in and drops its results if a logout happened since.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use pogo_live_core::Position;

use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::events::SyncEvent;
use crate::gate::ExclusionGate;
use crate::inventory::InventoryProcessor;
use crate::retry::RetryingSession;
use crate::session::RemoteGameSession;
use crate::world::{MapFetch, WorldState, WorldView};

/// Lifecycle state of a [`SyncScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Never primed.
    Uninitialized,
    /// Waiting for the first fix or running the first cycle.
    Priming,
    /// Timer armed, no cycle in flight.
    Idle,
    /// A cycle is in flight.
    Refreshing,
    /// Logged out or failed; [`SyncScheduler::prime`] starts over.
    Stopped,
}

impl SchedulerState {
    fn is_running(self) -> bool {
        matches!(self, SchedulerState::Idle | SchedulerState::Refreshing)
    }
}

/// What happened to a refresh trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A full cycle ran and its results are published.
    Refreshed,
    /// The tick was consumed by the skip flag a forced refresh set.
    Skipped,
    /// Another cycle held the gate; nothing ran.
    Busy,
    /// The scheduler is not primed.
    NotRunning,
}

struct BackgroundTasks {
    shutdown: watch::Sender<bool>,
    sensor: JoinHandle<()>,
    timer: Option<JoinHandle<()>>,
}

struct SyncContext<S> {
    session: RetryingSession<S>,
    config: SyncConfig,
    processor: InventoryProcessor,
    gate: ExclusionGate,
    skip_next_tick: AtomicBool,
    cycles: AtomicU64,
    /// Bumped by logout while holding the state lock.
    epoch: AtomicU64,
    state: Mutex<SchedulerState>,
    position: RwLock<Option<Position>>,
    world: RwLock<WorldState>,
    events: broadcast::Sender<SyncEvent>,
    tasks: Mutex<Option<BackgroundTasks>>,
}

/// Drives refresh cycles against a [`RemoteGameSession`].
///
/// Cheap to clone; clones share the same state.
pub struct SyncScheduler<S> {
    ctx: Arc<SyncContext<S>>,
}

impl<S> Clone for SyncScheduler<S> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl<S: RemoteGameSession + 'static> SyncScheduler<S> {
    pub fn new(session: S, config: SyncConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            ctx: Arc::new(SyncContext {
                session: RetryingSession::new(session, config.retry.clone()),
                config,
                processor: InventoryProcessor::new(),
                gate: ExclusionGate::new(),
                skip_next_tick: AtomicBool::new(false),
                cycles: AtomicU64::new(0),
                epoch: AtomicU64::new(0),
                state: Mutex::new(SchedulerState::Uninitialized),
                position: RwLock::new(None),
                world: RwLock::new(WorldState::default()),
                events,
                tasks: Mutex::new(None),
            }),
        }
    }

    pub fn state(&self) -> SchedulerState {
        *self.ctx.state()
    }

    /// The session, with every call going through the retry policy.
    pub fn session(&self) -> &RetryingSession<S> {
        &self.ctx.session
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.ctx.events.subscribe()
    }

    pub fn position(&self) -> Option<Position> {
        *self.ctx.position()
    }

    /// Current published player level, 0 before the first cycle.
    pub fn level(&self) -> u32 {
        self.ctx.world().stats.level()
    }

    pub fn view(&self) -> WorldView {
        let position = self.position();
        self.ctx.world().view(position)
    }

    /// Number of cycles started since creation.
    pub fn cycles(&self) -> u64 {
        self.ctx.cycles.load(Ordering::Acquire)
    }

    /// Start syncing.
    ///
    /// Waits for the first fix from `sensor` (or reuses the last known
    /// one), runs one full cycle, then arms the periodic timer. Later
    /// fixes are tracked in the background until logout. On error the
    /// scheduler is left `Stopped` and the timer is never armed.
    pub async fn prime(&self, sensor: mpsc::Receiver<Position>) -> Result<()> {
        let epoch = {
            let mut state = self.ctx.state();
            match *state {
                SchedulerState::Uninitialized | SchedulerState::Stopped => {
                    *state = SchedulerState::Priming;
                }
                other => {
                    return Err(SyncError::InvalidState(format!(
                        "cannot prime while {other:?}"
                    )))
                }
            }
            self.ctx.epoch()
        };

        match self.start(sensor, epoch).await {
            Ok(()) => {
                info!(
                    interval_secs = self.ctx.config.refresh_interval_secs,
                    "scheduler primed"
                );
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "priming failed");
                self.ctx.stop_if_current(epoch);
                Err(err)
            }
        }
    }

    async fn start(&self, mut sensor: mpsc::Receiver<Position>, epoch: u64) -> Result<()> {
        // Leftovers from a previous run must not race the new ones.
        self.ctx.stop_background();

        let cached = *self.ctx.position();
        let first = match cached {
            Some(position) => {
                debug!("reusing last known position");
                position
            }
            None => sensor.recv().await.ok_or(SyncError::SensorClosed)?,
        };

        let (shutdown, shutdown_rx) = watch::channel(false);
        {
            let _state = self.ctx.state();
            if !self.ctx.is_current(epoch) {
                return Err(logged_out_while_priming());
            }
            self.ctx.set_position(first);
            let sensor_task = tokio::spawn(track_position(
                Arc::clone(&self.ctx),
                sensor,
                shutdown_rx.clone(),
            ));
            *self.ctx.tasks() = Some(BackgroundTasks {
                shutdown,
                sensor: sensor_task,
                timer: None,
            });
        }

        {
            let _guard = self.ctx.gate.try_acquire().ok_or_else(|| {
                SyncError::InvalidState("a cycle is already in flight".into())
            })?;
            if !self.ctx.run_cycle(epoch).await? {
                return Err(logged_out_while_priming());
            }
        }

        let mut state = self.ctx.state();
        if !self.ctx.is_current(epoch) {
            return Err(logged_out_while_priming());
        }
        let timer = tokio::spawn(run_timer(Arc::clone(&self.ctx), epoch, shutdown_rx));
        if let Some(tasks) = self.ctx.tasks().as_mut() {
            tasks.timer = Some(timer);
        }
        *state = SchedulerState::Idle;
        Ok(())
    }

    /// One timer tick: run a cycle unless one is in flight or a forced
    /// refresh asked to skip this tick.
    pub async fn tick(&self) -> Result<TickOutcome> {
        self.ctx.tick().await
    }

    /// Run a cycle now, unless one is in flight.
    ///
    /// The next timer tick is skipped so the two do not run back to back.
    /// Errors are returned to the caller and do not stop the timer.
    pub async fn force_refresh(&self) -> Result<TickOutcome> {
        let Some(epoch) = self.ctx.running_epoch() else {
            return Ok(TickOutcome::NotRunning);
        };
        let Some(_guard) = self.ctx.gate.try_acquire() else {
            debug!("forced refresh dropped, cycle in flight");
            return Ok(TickOutcome::Busy);
        };
        self.ctx.skip_next_tick.store(true, Ordering::Release);
        self.ctx.refresh(epoch).await
    }

    /// Stop syncing and clear everything published.
    ///
    /// A cycle already in flight runs to completion, but its results are
    /// discarded. The timer task is awaited before the state is cleared.
    pub async fn logout(&self) {
        {
            let mut state = self.ctx.state();
            self.ctx.epoch.fetch_add(1, Ordering::AcqRel);
            *state = SchedulerState::Stopped;
        }

        let tasks = self.ctx.tasks().take();
        if let Some(tasks) = tasks {
            tasks.shutdown.send_replace(true);
            tasks.sensor.abort();
            if let Some(timer) = tasks.timer {
                if let Err(err) = timer.await {
                    warn!(error = %err, "refresh timer ended abnormally");
                }
            }
        }

        self.ctx.skip_next_tick.store(false, Ordering::Release);
        self.ctx.session.reset();
        *self.ctx.position_mut() = None;

        let events = self.ctx.world_mut().clear();
        for event in events {
            self.ctx.publish(event);
        }
        info!("logged out, world state cleared");
    }
}

impl<S: RemoteGameSession + 'static> SyncContext<S> {
    fn state(&self) -> MutexGuard<'_, SchedulerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tasks(&self) -> MutexGuard<'_, Option<BackgroundTasks>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn position(&self) -> RwLockReadGuard<'_, Option<Position>> {
        self.position.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn position_mut(&self) -> RwLockWriteGuard<'_, Option<Position>> {
        self.position.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn world(&self) -> RwLockReadGuard<'_, WorldState> {
        self.world.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn world_mut(&self) -> RwLockWriteGuard<'_, WorldState> {
        self.world.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: SyncEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn set_position(&self, position: Position) {
        *self.position_mut() = Some(position);
        self.publish(SyncEvent::PositionUpdated(position));
    }

    fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch() == epoch
    }

    /// The current epoch, if the scheduler is primed.
    fn running_epoch(&self) -> Option<u64> {
        let state = self.state();
        state.is_running().then(|| self.epoch())
    }

    /// Stop the run started at `epoch`, unless a logout already did.
    ///
    /// Returns whether the scheduler was stopped.
    fn stop_if_current(&self, epoch: u64) -> bool {
        let mut state = self.state();
        if !self.is_current(epoch) {
            return false;
        }
        *state = SchedulerState::Stopped;
        self.stop_background();
        true
    }

    /// Signal background tasks to stop without waiting for them.
    fn stop_background(&self) {
        if let Some(tasks) = self.tasks().take() {
            tasks.shutdown.send_replace(true);
            tasks.sensor.abort();
        }
    }

    async fn tick(&self) -> Result<TickOutcome> {
        let Some(epoch) = self.running_epoch() else {
            return Ok(TickOutcome::NotRunning);
        };
        let Some(_guard) = self.gate.try_acquire() else {
            debug!("tick dropped, cycle in flight");
            return Ok(TickOutcome::Busy);
        };
        if self.skip_next_tick.swap(false, Ordering::AcqRel) {
            debug!("tick skipped after forced refresh");
            return Ok(TickOutcome::Skipped);
        }
        self.refresh(epoch).await
    }

    /// Run a cycle with the gate already held, tracking the state.
    async fn refresh(&self, epoch: u64) -> Result<TickOutcome> {
        {
            let mut state = self.state();
            if *state == SchedulerState::Idle {
                *state = SchedulerState::Refreshing;
            }
        }
        let result = self.run_cycle(epoch).await;
        {
            let mut state = self.state();
            if *state == SchedulerState::Refreshing {
                *state = SchedulerState::Idle;
            }
        }
        if result? {
            Ok(TickOutcome::Refreshed)
        } else {
            Ok(TickOutcome::NotRunning)
        }
    }

    /// One full cycle. The caller holds the gate.
    ///
    /// Returns false when a logout since `epoch` made the results stale;
    /// nothing is published then.
    async fn run_cycle(&self, epoch: u64) -> Result<bool> {
        let cycle = self.cycles.fetch_add(1, Ordering::AcqRel) + 1;
        let position = (*self.position()).ok_or(SyncError::NoPosition)?;
        debug!(cycle, lat = position.latitude, lon = position.longitude, "cycle started");

        self.session
            .update_position(position.latitude, position.longitude, position.altitude)
            .await?;

        let map = self.session.fetch_map_objects().await?;
        let incense = self.session.fetch_incense_encounter().await?;
        let mut fetch = MapFetch {
            catchables: map.catchable_pokemons(),
            nearby: map.nearby_pokemons(),
            checkpoints: map.checkpoints(),
        };
        if let Some(lured) = incense.to_map_pokemon() {
            debug!(encounter = %lured.encounter_id, "incense encounter available");
            fetch.catchables.push(lured);
        }

        let delta = self.session.fetch_inventory_delta().await?;
        if !self.is_current(epoch) {
            debug!(cycle, "logged out mid-cycle, skipping inventory processing");
            return Ok(false);
        }
        let bootstrap = !self.world().stats.is_initialized();
        let update = self.processor.process(&self.session, &delta, bootstrap).await?;

        let events = {
            let mut world = self.world_mut();
            if !self.is_current(epoch) {
                info!(cycle, "logged out mid-cycle, results discarded");
                return Ok(false);
            }
            let mut events = world.apply_map(&fetch);
            events.extend(update.apply(&mut world));
            events
        };
        for event in events {
            self.publish(event);
        }
        self.publish(SyncEvent::CycleCompleted { cycle });

        info!(
            cycle,
            catchables = fetch.catchables.len(),
            nearby = fetch.nearby.len(),
            checkpoints = fetch.checkpoints.len(),
            "cycle completed"
        );
        Ok(true)
    }
}

fn logged_out_while_priming() -> SyncError {
    SyncError::InvalidState("logged out while priming".into())
}

async fn track_position<S: RemoteGameSession + 'static>(
    ctx: Arc<SyncContext<S>>,
    mut sensor: mpsc::Receiver<Position>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            fix = sensor.recv() => match fix {
                Some(position) => ctx.set_position(position),
                None => {
                    debug!("position stream closed");
                    break;
                }
            },
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}

async fn run_timer<S: RemoteGameSession + 'static>(
    ctx: Arc<SyncContext<S>>,
    epoch: u64,
    mut shutdown: watch::Receiver<bool>,
) {
    let period = ctx.config.refresh_interval();
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match ctx.tick().await {
                    Ok(outcome) => debug!(?outcome, "timer tick"),
                    Err(err) => {
                        error!(error = %err, "refresh cycle failed, stopping timer");
                        if ctx.stop_if_current(epoch) {
                            ctx.publish(SyncEvent::CycleFailed {
                                message: err.to_string(),
                                requires_login: err.requires_login(),
                            });
                        }
                        break;
                    }
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    debug!("refresh timer stopped");
}
