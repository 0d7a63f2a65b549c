#![cfg(feature = "std")]

//! Run configuration for the game driver, loadable from JSON.

use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_BOARD_SIZE;

/// Timing and board settings for one game. Every field may be omitted in the
/// JSON file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub board_size: usize,
    pub overall_timeout_secs: u64,
    pub opponent_wait_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub settle_delay_ms: u64,
    pub result_read_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            overall_timeout_secs: 600,
            opponent_wait_timeout_ms: 30_000,
            poll_interval_ms: 500,
            settle_delay_ms: 300,
            result_read_retries: 5,
            retry_backoff_ms: 200,
        }
    }
}

impl GameConfig {
    /// Defaults with every delay cut to the minimum, for opponents that
    /// answer immediately.
    pub fn without_delays() -> Self {
        Self {
            poll_interval_ms: 1,
            settle_delay_ms: 0,
            retry_backoff_ms: 0,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid game config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading config {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.board_size > 0, "board_size must be at least 1");
        ensure!(
            self.result_read_retries > 0,
            "result_read_retries must be at least 1"
        );
        ensure!(self.poll_interval_ms > 0, "poll_interval_ms must be at least 1");
        ensure!(
            self.opponent_wait_timeout_ms > 0,
            "opponent_wait_timeout_ms must be at least 1"
        );
        ensure!(
            self.overall_timeout_secs > 0,
            "overall_timeout_secs must be at least 1"
        );
        Ok(())
    }

    pub fn overall_timeout(&self) -> Duration {
        Duration::from_secs(self.overall_timeout_secs)
    }

    pub fn opponent_wait_timeout(&self) -> Duration {
        Duration::from_millis(self.opponent_wait_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
