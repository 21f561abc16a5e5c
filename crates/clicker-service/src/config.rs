//! Service configuration.

use std::str::FromStr;
use std::time::Duration;

use clicker_core::{
    UpgradePricing, UserId, DEFAULT_CLICK_COOLDOWN_MS, INCOME_INTERVAL_SECS, MIN_BET,
};

/// Default directory for the JSON documents.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default seconds between flushes of dirty documents.
pub const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 5;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the JSON documents (default: "data").
    pub data_dir: String,

    /// Seconds between business income ticks (default: 15).
    pub income_interval_secs: u64,

    /// Seconds between flushes of dirty documents (default: 5).
    pub flush_interval_secs: u64,

    /// Minimum milliseconds between two clicks of one player (default: 500).
    pub click_cooldown_ms: i64,

    /// Bot owner. Only the owner can grant or revoke admin rights.
    pub owner_id: Option<UserId>,

    /// Smallest accepted casino bet in whole coins (default: 100).
    pub min_bet: i64,

    /// Upgrade pricing.
    pub pricing: UpgradePricing,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults. An
    /// `OWNER_ID` of 0 means no owner, matching an unset variable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            income_interval_secs: env_or("INCOME_INTERVAL_SECS", defaults.income_interval_secs)
                .max(1),
            flush_interval_secs: env_or("FLUSH_INTERVAL_SECS", defaults.flush_interval_secs)
                .max(1),
            click_cooldown_ms: env_or("CLICK_COOLDOWN_MS", defaults.click_cooldown_ms).max(0),
            owner_id: std::env::var("OWNER_ID")
                .ok()
                .and_then(|s| s.parse::<UserId>().ok())
                .filter(|id| id.get() != 0),
            min_bet: env_or("MIN_BET", defaults.min_bet).max(1),
            pricing: defaults.pricing,
        }
    }

    /// Interval between income ticks.
    #[must_use]
    pub const fn income_interval(&self) -> Duration {
        Duration::from_secs(self.income_interval_secs)
    }

    /// Interval between flushes.
    #[must_use]
    pub const fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_secs)
    }

    /// Minimum time between two clicks.
    #[must_use]
    pub fn click_cooldown(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.click_cooldown_ms)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.into(),
            income_interval_secs: INCOME_INTERVAL_SECS,
            flush_interval_secs: DEFAULT_FLUSH_INTERVAL_SECS,
            click_cooldown_ms: DEFAULT_CLICK_COOLDOWN_MS,
            owner_id: None,
            min_bet: MIN_BET,
            pricing: UpgradePricing::default(),
        }
    }
}
