//! Level-up rewards.
//!
//! Rewards for each level are claimed once: the last acknowledged level is
//! persisted before the response is inspected, so a level is never asked
//! for twice even if its rewards could not be shown.

use std::fmt::Write as _;

use tracing::{debug, info};

use pogo_live_core::{ItemAward, ItemKind};
use pogo_live_settings::SettingsStore;
use pogo_live_sync::{RemoteGameSession, RetryingSession};

use crate::error::Result;

/// Rewards granted for one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRewards {
    pub level: u32,
    pub items_unlocked: Vec<ItemKind>,
    pub items_awarded: Vec<ItemAward>,
}

impl LevelRewards {
    /// Title for a notification about these rewards.
    pub fn title(&self) -> String {
        format!("Awards for level {}", self.level)
    }

    /// Human-readable listing of the rewards.
    pub fn summary(&self) -> String {
        let mut text = String::from("Congratulations, you gained another level!\n\n");

        if !self.items_unlocked.is_empty() {
            text.push_str("Items unlocked:\n");
            for item in &self.items_unlocked {
                let _ = writeln!(text, "{}", item.display_name());
            }
            text.push('\n');
        }

        if !self.items_awarded.is_empty() {
            text.push_str("Items awarded:\n");
            for award in &self.items_awarded {
                let _ = writeln!(text, "{} x {}", award.count, award.item.display_name());
            }
            text.push('\n');
        }

        text
    }
}

/// Claim rewards for every level above the last acknowledged one, up to
/// and including `current_level`.
pub async fn claim_level_rewards<S, St>(
    session: &RetryingSession<S>,
    settings: &St,
    current_level: u32,
) -> Result<Vec<LevelRewards>>
where
    S: RemoteGameSession,
    St: SettingsStore + ?Sized,
{
    let last = settings.last_level_reward().await?;
    let mut claimed = Vec::new();

    for level in last.saturating_add(1)..=current_level {
        let response = session.fetch_level_rewards(level).await?;
        settings.set_last_level_reward(level).await?;

        if !response.is_success() {
            debug!(level, result = ?response.result, "no rewards to show");
            continue;
        }

        info!(
            level,
            unlocked = response.items_unlocked.len(),
            awarded = response.items_awarded.len(),
            "level rewards claimed"
        );
        claimed.push(LevelRewards {
            level,
            items_unlocked: response.items_unlocked,
            items_awarded: response.items_awarded,
        });
    }

    Ok(claimed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pogo_live_core::{LevelUpRewards, RewardsResult};
    use pogo_live_settings::MemorySettings;
    use pogo_live_sync::session::memory::{MemorySession, SessionCall};
    use pogo_live_sync::{RetryConfig, SessionError};

    fn success(items: Vec<ItemAward>, unlocked: Vec<ItemKind>) -> LevelUpRewards {
        LevelUpRewards {
            result: RewardsResult::Success,
            items_awarded: items,
            items_unlocked: unlocked,
        }
    }

    #[test]
    fn test_summary() {
        let rewards = LevelRewards {
            level: 5,
            items_unlocked: vec![ItemKind::ItemGreatBall],
            items_awarded: vec![ItemAward {
                item: ItemKind::ItemPokeBall,
                count: 20,
            }],
        };

        assert_eq!(rewards.title(), "Awards for level 5");
        assert_eq!(
            rewards.summary(),
            "Congratulations, you gained another level!\n\n\
             Items unlocked:\nGreatBall\n\n\
             Items awarded:\n20 x PokeBall\n\n"
        );
    }

    #[tokio::test]
    async fn test_claims_each_pending_level_once() {
        let session = RetryingSession::new(MemorySession::new(), RetryConfig::default());
        session.inner().set_level_rewards(
            3,
            success(
                vec![ItemAward {
                    item: ItemKind::ItemPotion,
                    count: 10,
                }],
                Vec::new(),
            ),
        );
        let settings = MemorySettings::new();

        let claimed = claim_level_rewards(&session, &settings, 4).await.unwrap();

        // Levels 2..=4 were asked for; only 3 had something to show.
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].level, 3);
        assert_eq!(settings.last_level_reward().await.unwrap(), 4);
        assert_eq!(
            session.inner().calls(),
            vec![
                SessionCall::FetchLevelRewards(2),
                SessionCall::FetchLevelRewards(3),
                SessionCall::FetchLevelRewards(4),
            ]
        );

        let again = claim_level_rewards(&session, &settings, 4).await.unwrap();
        assert!(again.is_empty());
        assert_eq!(session.inner().calls().len(), 3);
    }

    #[tokio::test]
    async fn test_failure_keeps_progress_so_far() {
        let session = RetryingSession::new(MemorySession::new(), RetryConfig::default());
        let settings = MemorySettings::new();

        claim_level_rewards(&session, &settings, 2).await.unwrap();
        session.inner().fail_next(1, SessionError::Unauthenticated);

        assert!(claim_level_rewards(&session, &settings, 6).await.is_err());
        assert_eq!(settings.last_level_reward().await.unwrap(), 2);
    }
}
