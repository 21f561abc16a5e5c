//! Player ledger records.
//!
//! A `PlayerRecord` is the economic state of one user on one server. It is
//! created by the "start" command, mutated by clicks, upgrades and admin
//! commands, and never deleted; [`PlayerRecord::reset`] returns it to the
//! starting values instead.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, Result};
use crate::ids::{PlayerKey, ServerId, UserId};
use crate::money::Money;
use crate::pricing::{UpgradePricing, UpgradeTrack};

// ============================================================================
// Constants
// ============================================================================

/// Minimum time between two accepted clicks, in milliseconds.
pub const DEFAULT_CLICK_COOLDOWN_MS: i64 = 500;

/// Starting income per click.
pub const STARTING_INCOME_PER_CLICK: u64 = 1;

/// Starting level.
pub const STARTING_LEVEL: u32 = 1;

/// The ledger entry for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// The user.
    pub user_id: UserId,

    /// The server the record belongs to.
    pub server_id: ServerId,

    /// Current balance.
    pub money: Money,

    /// Coins earned per click (at least 1).
    pub income_per_click: u64,

    /// Passive income per second bought on the idle track.
    #[serde(default)]
    pub income_per_sec: u64,

    /// Click upgrade level (at least 1).
    pub level: u32,

    /// When the player last clicked.
    #[serde(default, with = "crate::timestamp::option")]
    pub last_click_time: Option<DateTime<Utc>>,

    /// When the record was created.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,

    /// Whether the player passed the certification quiz.
    #[serde(default)]
    pub has_certificate: bool,

    /// When the certificate was issued.
    #[serde(default, with = "crate::timestamp::option")]
    pub certificate_date: Option<DateTime<Utc>>,
}

impl PlayerRecord {
    /// Create a fresh record with starting values.
    #[must_use]
    pub fn new(key: PlayerKey, now: DateTime<Utc>) -> Self {
        Self {
            user_id: key.user_id,
            server_id: key.server_id,
            money: Money::ZERO,
            income_per_click: STARTING_INCOME_PER_CLICK,
            income_per_sec: 0,
            level: STARTING_LEVEL,
            last_click_time: None,
            created_at: now,
            has_certificate: false,
            certificate_date: None,
        }
    }

    /// The composite key of this record.
    #[must_use]
    pub const fn key(&self) -> PlayerKey {
        PlayerKey {
            user_id: self.user_id,
            server_id: self.server_id,
        }
    }

    /// Check if the balance covers `amount`.
    #[must_use]
    pub fn can_afford(&self, amount: Money) -> bool {
        self.money >= amount
    }

    /// Set the balance in whole coins, clamped at zero.
    pub fn set_money(&mut self, coins: i64) {
        self.money = Money::coins(coins);
    }

    /// Set the level, clamped to at least 1.
    pub fn set_level(&mut self, level: i64) {
        self.level = u32::try_from(level.max(1)).unwrap_or(u32::MAX);
    }

    /// Set income per click, clamped to at least 1.
    pub fn set_income_per_click(&mut self, amount: i64) {
        self.income_per_click = u64::try_from(amount.max(1)).unwrap_or(1);
    }

    /// Set passive income per second, clamped at zero.
    pub fn set_income_per_sec(&mut self, amount: i64) {
        self.income_per_sec = u64::try_from(amount).unwrap_or(0);
    }

    /// Add (or with a negative delta, remove) whole coins, clamped at zero.
    pub fn add_money(&mut self, delta: i64) {
        self.money = self.money.offset_coins(delta);
    }

    /// Credit an amount of money.
    pub fn credit(&mut self, amount: Money) {
        self.money += amount;
    }

    /// Debit an amount of money.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InsufficientFunds` and leaves the balance alone
    /// if the balance is lower than `amount`.
    pub fn debit(&mut self, amount: Money) -> Result<Money> {
        self.money = self
            .money
            .checked_sub(amount)
            .ok_or(EconomyError::InsufficientFunds {
                balance: self.money,
                required: amount,
            })?;
        Ok(self.money)
    }

    /// Register a click at `now`.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::ClickCooldown` if the previous click was less
    /// than `cooldown` ago.
    pub fn click(&mut self, now: DateTime<Utc>, cooldown: Duration) -> Result<ClickReceipt> {
        if let Some(last) = self.last_click_time {
            let elapsed = now - last;
            if elapsed < cooldown {
                return Err(EconomyError::ClickCooldown {
                    remaining_ms: (cooldown - elapsed).num_milliseconds(),
                });
            }
        }

        let earned = Money::coins(i64::try_from(self.income_per_click).unwrap_or(i64::MAX));
        self.credit(earned);
        self.last_click_time = Some(now);

        Ok(ClickReceipt {
            earned,
            balance_after: self.money,
        })
    }

    /// Buy one upgrade on `track`.
    ///
    /// The price depends on the current `level` for both tracks. Only the
    /// click track raises the level.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InsufficientFunds` if the player cannot pay;
    /// the record is unchanged in that case.
    pub fn upgrade(
        &mut self,
        track: UpgradeTrack,
        pricing: &UpgradePricing,
    ) -> Result<UpgradeReceipt> {
        let cost = pricing.cost(track, self.level);
        self.debit(cost)?;

        match track {
            UpgradeTrack::Click => {
                self.income_per_click = self.income_per_click.saturating_add(1);
                self.level = self.level.saturating_add(1);
            }
            UpgradeTrack::Idle => {
                self.income_per_sec = self.income_per_sec.saturating_add(1);
            }
        }

        Ok(UpgradeReceipt {
            track,
            cost,
            balance_after: self.money,
            level: self.level,
            income_per_click: self.income_per_click,
            income_per_sec: self.income_per_sec,
            next_cost: pricing.cost(track, self.level),
        })
    }

    /// Mark the player as certified.
    pub fn issue_certificate(&mut self, now: DateTime<Utc>) {
        self.has_certificate = true;
        self.certificate_date = Some(now);
    }

    /// Return all progress to starting values, keeping identity and `created_at`.
    pub fn reset(&mut self) {
        self.money = Money::ZERO;
        self.income_per_click = STARTING_INCOME_PER_CLICK;
        self.income_per_sec = 0;
        self.level = STARTING_LEVEL;
        self.last_click_time = None;
        self.has_certificate = false;
        self.certificate_date = None;
    }
}

/// Result of an accepted click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClickReceipt {
    /// Coins earned by the click.
    pub earned: Money,
    /// Balance after the click.
    pub balance_after: Money,
}

/// Result of a successful upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpgradeReceipt {
    /// The track that was upgraded.
    pub track: UpgradeTrack,
    /// Price paid.
    pub cost: Money,
    /// Balance after paying.
    pub balance_after: Money,
    /// Level after the upgrade.
    pub level: u32,
    /// Income per click after the upgrade.
    pub income_per_click: u64,
    /// Passive income per second after the upgrade.
    pub income_per_sec: u64,
    /// Price of the next upgrade on the same track.
    pub next_cost: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PlayerRecord {
        PlayerRecord::new(PlayerKey::new(1, 100), Utc::now())
    }

    #[test]
    fn new_record_has_starting_values() {
        let player = record();
        assert_eq!(player.money, Money::ZERO);
        assert_eq!(player.level, 1);
        assert_eq!(player.income_per_click, 1);
        assert_eq!(player.income_per_sec, 0);
        assert!(!player.has_certificate);
        assert_eq!(player.key(), PlayerKey::new(1, 100));
    }

    #[test]
    fn setters_clamp_to_domain_minimums() {
        let mut player = record();
        player.set_money(-10);
        player.set_level(0);
        player.set_income_per_click(-3);
        player.set_income_per_sec(-1);
        assert_eq!(player.money, Money::ZERO);
        assert_eq!(player.level, 1);
        assert_eq!(player.income_per_click, 1);
        assert_eq!(player.income_per_sec, 0);

        player.set_level(12);
        player.set_income_per_click(9);
        assert_eq!(player.level, 12);
        assert_eq!(player.income_per_click, 9);
    }

    #[test]
    fn upgrade_without_funds_leaves_record_unchanged() {
        let mut player = record();
        player.set_money(49);
        let before = player.clone();

        let result = player.upgrade(UpgradeTrack::Click, &UpgradePricing::default());
        assert_eq!(
            result,
            Err(EconomyError::InsufficientFunds {
                balance: Money::coins(49),
                required: Money::coins(50),
            })
        );
        assert_eq!(player, before);
    }

    #[test]
    fn click_upgrade_at_level_one() {
        let mut player = record();
        player.set_money(70);

        let receipt = player
            .upgrade(UpgradeTrack::Click, &UpgradePricing::default())
            .unwrap();
        assert_eq!(receipt.cost, Money::coins(50));
        assert_eq!(player.money, Money::coins(20));
        assert_eq!(player.level, 2);
        assert_eq!(player.income_per_click, 2);
        assert_eq!(receipt.next_cost, Money::coins(60));
    }

    #[test]
    fn idle_upgrade_keeps_level() {
        let mut player = record();
        player.set_money(100);

        player
            .upgrade(UpgradeTrack::Idle, &UpgradePricing::default())
            .unwrap();
        assert_eq!(player.money, Money::ZERO);
        assert_eq!(player.level, 1);
        assert_eq!(player.income_per_sec, 1);
        assert_eq!(player.income_per_click, 1);
    }

    #[test]
    fn click_respects_cooldown() {
        let mut player = record();
        let start = Utc::now();
        let cooldown = Duration::milliseconds(DEFAULT_CLICK_COOLDOWN_MS);

        let first = player.click(start, cooldown).unwrap();
        assert_eq!(first.earned, Money::coins(1));

        let early = player.click(start + Duration::milliseconds(200), cooldown);
        assert_eq!(early, Err(EconomyError::ClickCooldown { remaining_ms: 300 }));
        assert_eq!(player.money, Money::coins(1));

        let later = player
            .click(start + Duration::milliseconds(500), cooldown)
            .unwrap();
        assert_eq!(later.balance_after, Money::coins(2));
    }

    #[test]
    fn reset_is_idempotent_and_keeps_identity() {
        let mut player = record();
        player.set_money(5000);
        player.set_level(7);
        player.set_income_per_click(7);
        player.issue_certificate(Utc::now());

        player.reset();
        let once = player.clone();
        player.reset();

        assert_eq!(player, once);
        assert_eq!(player.money, Money::ZERO);
        assert_eq!(player.level, 1);
        assert!(!player.has_certificate);
        assert_eq!(player.key(), PlayerKey::new(1, 100));
    }

    #[test]
    fn add_money_clamps_at_zero() {
        let mut player = record();
        player.add_money(30);
        player.add_money(-100);
        assert_eq!(player.money, Money::ZERO);
    }
}
