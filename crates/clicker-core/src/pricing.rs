//! Upgrade pricing.
//!
//! Both upgrade tracks follow the same geometric curve:
//!
//! `cost(level) = floor(base_cost * 1.2^(level - 1))`

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Cost growth per level (20 %).
pub const UPGRADE_GROWTH: f64 = 1.2;

/// Base cost of the first click upgrade.
pub const DEFAULT_CLICK_BASE_COST: i64 = 50;

/// Base cost of the first passive-income upgrade.
pub const DEFAULT_IDLE_BASE_COST: i64 = 100;

/// Which upgrade a player is buying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeTrack {
    /// Raises income per click and the player's level.
    Click,
    /// Raises passive income per second; the level is left alone.
    Idle,
}

/// Pricing configuration for upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradePricing {
    /// Base cost of the click track.
    pub click_base_cost: i64,
    /// Base cost of the idle track.
    pub idle_base_cost: i64,
    /// Multiplicative growth per level.
    pub growth: f64,
}

impl Default for UpgradePricing {
    fn default() -> Self {
        Self {
            click_base_cost: DEFAULT_CLICK_BASE_COST,
            idle_base_cost: DEFAULT_IDLE_BASE_COST,
            growth: UPGRADE_GROWTH,
        }
    }
}

impl UpgradePricing {
    /// Base cost of a track.
    #[must_use]
    pub const fn base_cost(&self, track: UpgradeTrack) -> i64 {
        match track {
            UpgradeTrack::Click => self.click_base_cost,
            UpgradeTrack::Idle => self.idle_base_cost,
        }
    }

    /// Cost in whole coins of the next upgrade on `track` for a player at `level`.
    ///
    /// Levels below 1 are priced as level 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn cost_coins(&self, track: UpgradeTrack, level: u32) -> i64 {
        let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
        let raw = self.base_cost(track) as f64 * self.growth.powi(exponent);
        // `as` saturates, so runaway levels cap at i64::MAX instead of wrapping.
        raw.floor() as i64
    }

    /// Cost of the next upgrade as `Money`.
    #[must_use]
    pub fn cost(&self, track: UpgradeTrack, level: u32) -> Money {
        Money::coins(self.cost_coins(track, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_click_upgrade_costs_base() {
        let pricing = UpgradePricing::default();
        assert_eq!(pricing.cost_coins(UpgradeTrack::Click, 1), 50);
        assert_eq!(pricing.cost_coins(UpgradeTrack::Idle, 1), 100);
    }

    #[test]
    fn cost_follows_geometric_curve() {
        let pricing = UpgradePricing::default();
        // 50 * 1.2 = 60, 50 * 1.44 = 72, 50 * 1.728 = 86.4 -> 86
        assert_eq!(pricing.cost_coins(UpgradeTrack::Click, 2), 60);
        assert_eq!(pricing.cost_coins(UpgradeTrack::Click, 3), 72);
        assert_eq!(pricing.cost_coins(UpgradeTrack::Click, 4), 86);
        // 100 * 2.0736 = 207.36 -> 207
        assert_eq!(pricing.cost_coins(UpgradeTrack::Idle, 5), 207);
    }

    #[test]
    fn level_zero_priced_as_level_one() {
        let pricing = UpgradePricing::default();
        assert_eq!(
            pricing.cost_coins(UpgradeTrack::Click, 0),
            pricing.cost_coins(UpgradeTrack::Click, 1)
        );
    }

    #[test]
    fn cost_is_monotonic_in_level() {
        let pricing = UpgradePricing::default();
        for track in [UpgradeTrack::Click, UpgradeTrack::Idle] {
            let mut previous = 0;
            for level in 1..=300 {
                let cost = pricing.cost_coins(track, level);
                assert!(cost >= previous, "{track:?} level {level}: {cost} < {previous}");
                previous = cost;
            }
        }
    }

    #[test]
    fn huge_levels_saturate() {
        let pricing = UpgradePricing::default();
        assert_eq!(pricing.cost_coins(UpgradeTrack::Click, u32::MAX), i64::MAX);
    }
}
