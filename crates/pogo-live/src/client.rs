//! The GameClient: unified API for the synchronizer.
//!
//! The client brings together the session, the scheduler and the
//! persisted settings.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::info;

use pogo_live_core::{PlayerProfile, Position};
use pogo_live_settings::SettingsStore;
use pogo_live_sync::{
    RemoteGameSession, SchedulerState, SyncEvent, SyncScheduler, TickOutcome, WorldView,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::rewards::{self, LevelRewards};

/// The main client struct.
///
/// Provides a unified API for:
/// - Starting and stopping live sync
/// - Forcing a refresh
/// - Reading the published world state
/// - Claiming level rewards
pub struct GameClient<S: RemoteGameSession + 'static, St: SettingsStore> {
    scheduler: SyncScheduler<S>,
    settings: Arc<St>,
}

impl<S: RemoteGameSession + 'static, St: SettingsStore> GameClient<S, St> {
    /// Create a client around an authenticated session.
    pub fn new(session: S, settings: St, config: ClientConfig) -> Self {
        Self {
            scheduler: SyncScheduler::new(session, config.sync),
            settings: Arc::new(settings),
        }
    }

    pub fn scheduler(&self) -> &SyncScheduler<S> {
        &self.scheduler
    }

    pub fn settings(&self) -> &St {
        &self.settings
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.scheduler.subscribe()
    }

    pub fn view(&self) -> WorldView {
        self.scheduler.view()
    }

    /// Remember the token of the session the client was built with.
    pub async fn remember_auth_token(&self, token: impl Into<String>) -> Result<()> {
        self.settings.set_auth_token(Some(token.into())).await?;
        Ok(())
    }

    /// Start live sync from the given position stream.
    pub async fn start(&self, sensor: mpsc::Receiver<Position>) -> Result<()> {
        self.scheduler.prime(sensor).await?;
        Ok(())
    }

    /// Refresh now unless a refresh is already running.
    pub async fn refresh(&self) -> Result<TickOutcome> {
        Ok(self.scheduler.force_refresh().await?)
    }

    pub async fn profile(&self) -> Result<PlayerProfile> {
        Ok(self.scheduler.session().fetch_profile().await?)
    }

    /// Claim rewards for levels reached since the last claim.
    ///
    /// Needs at least one completed refresh to know the current level.
    pub async fn claim_level_rewards(&self) -> Result<Vec<LevelRewards>> {
        let level = self.scheduler.level();
        if level == 0 {
            return Err(ClientError::LevelUnknown);
        }
        rewards::claim_level_rewards(self.scheduler.session(), self.settings.as_ref(), level).await
    }

    /// Stop syncing, clear the published state and forget the stored token.
    pub async fn logout(&self) -> Result<()> {
        self.scheduler.logout().await;
        self.settings.set_auth_token(None).await?;
        info!("client logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pogo_live_core::{InventoryDelta, InventoryRecord, PlayerStats};
    use pogo_live_settings::MemorySettings;
    use pogo_live_sync::session::memory::MemorySession;

    fn session_at_level(level: u32) -> Arc<MemorySession> {
        let session = Arc::new(MemorySession::new());
        session.set_inventory(InventoryDelta {
            records: vec![InventoryRecord::PlayerStats(PlayerStats {
                level,
                ..Default::default()
            })],
            ..Default::default()
        });
        session
    }

    async fn started(
        session: &Arc<MemorySession>,
    ) -> (
        GameClient<Arc<MemorySession>, MemorySettings>,
        mpsc::Sender<Position>,
    ) {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let client = GameClient::new(
            Arc::clone(session),
            MemorySettings::with_auth_token("token"),
            ClientConfig::default(),
        );
        let (tx, rx) = mpsc::channel(4);
        tx.send(Position::new(1.0, 1.0, 0.0)).await.unwrap();
        client.start(rx).await.unwrap();
        (client, tx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_rewards_need_a_known_level() {
        let client = GameClient::new(
            MemorySession::new(),
            MemorySettings::new(),
            ClientConfig::default(),
        );
        assert!(matches!(
            client.claim_level_rewards().await,
            Err(ClientError::LevelUnknown)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_claim_after_start() {
        let session = session_at_level(3);
        let (client, _tx) = started(&session).await;

        let claimed = client.claim_level_rewards().await.unwrap();

        assert!(claimed.is_empty());
        assert_eq!(client.settings().last_level_reward().await.unwrap(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_forgets_token_and_state() {
        let session = session_at_level(2);
        let (client, _tx) = started(&session).await;
        assert_eq!(client.view().stats.level, 2);

        client.logout().await.unwrap();

        assert_eq!(client.state(), SchedulerState::Stopped);
        assert_eq!(client.settings().auth_token().await.unwrap(), None);
        assert_eq!(client.view(), WorldView::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_profile_passes_through() {
        let session = session_at_level(1);
        session.set_profile(PlayerProfile {
            username: "ash".into(),
            ..Default::default()
        });
        let (client, _tx) = started(&session).await;

        assert_eq!(client.profile().await.unwrap().username, "ash");
    }
}
