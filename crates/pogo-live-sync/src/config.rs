//! Configuration for the sync scheduler.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retry policy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Consecutive failures tolerated before giving up.
    pub max_retries: u32,

    /// Pause before each retry, in milliseconds.
    pub delay_ms: u64,
}

impl RetryConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 50,
            delay_ms: 500,
        }
    }
}

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Period of the refresh timer, in seconds.
    pub refresh_interval_secs: u64,

    pub retry: RetryConfig,

    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
}

impl SyncConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 10,
            retry: RetryConfig::default(),
            event_capacity: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.refresh_interval(), Duration::from_secs(10));
        assert_eq!(config.retry.max_retries, 50);
        assert_eq!(config.retry.delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SyncConfig =
            serde_json::from_str(r#"{ "refresh_interval_secs": 30, "retry": { "delay_ms": 100 } }"#)
                .unwrap();

        assert_eq!(config.refresh_interval_secs, 30);
        assert_eq!(config.retry.delay_ms, 100);
        assert_eq!(config.retry.max_retries, 50);
        assert_eq!(config.event_capacity, 256);
    }
}
