//! Storage layer for the clicker bot.
//!
//! This crate keeps every domain in memory behind a single lock and persists
//! each domain as one whole JSON document.
//!
//! # Architecture
//!
//! The store holds five domains, each written to its own file:
//!
//! - `ledger` (`game_data.json`): player records, keyed by `PlayerKey`
//! - `businesses` (`business_data.json`): business portfolios per player
//! - `casino` (`casino_data.json`): casino statistics per player
//! - `jars` (`banka_data.json`): milk jar progress per player
//! - `admins` (`admins.json`): users with admin rights
//!
//! Every operation is a read-modify-write on the in-memory maps while the
//! lock is held, so concurrent callers never lose updates. Mutations mark
//! their domain dirty; [`Store::flush`] writes dirty domains to disk.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use clicker_core::{PlayerKey, UpgradePricing, UpgradeTrack};
//! use clicker_store::{JsonStore, Store};
//!
//! let store = JsonStore::open("/tmp/clicker-data").unwrap();
//!
//! // Create a player and buy an upgrade
//! let key = PlayerKey::new(1, 100);
//! store.create_player(key, Utc::now()).unwrap();
//! let receipt = store.upgrade(key, UpgradeTrack::Click, &UpgradePricing::default());
//!
//! // Persist
//! store.flush().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod files;
pub mod json;
pub mod schema;

pub use error::{Result, StoreError};
pub use json::JsonStore;
pub use schema::Domain;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use clicker_core::{
    BusinessKind, CasinoStats, ClickReceipt, JarProgress, Money, PlayerKey, PlayerRecord,
    Portfolio, PurchaseReceipt, ServerId, SpinOutcome, SpinTicket, UpgradePricing, UpgradeReceipt,
    UpgradeTrack, UserId,
};

/// A single-field change to a player record.
///
/// Setters clamp to the domain minimums (money >= 0, level >= 1,
/// income per click >= 1, income per second >= 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerChange {
    /// Set the balance in whole coins.
    SetMoney(i64),
    /// Set the level.
    SetLevel(i64),
    /// Set income per click.
    SetIncomePerClick(i64),
    /// Set passive income per second.
    SetIncomePerSec(i64),
    /// Add (or remove, when negative) whole coins.
    AddMoney(i64),
    /// Return all progress to starting values.
    Reset,
    /// Mark the player as certified.
    IssueCertificate(DateTime<Utc>),
}

impl PlayerChange {
    /// Apply the change to a record.
    pub fn apply(self, player: &mut PlayerRecord) {
        match self {
            Self::SetMoney(coins) => player.set_money(coins),
            Self::SetLevel(level) => player.set_level(level),
            Self::SetIncomePerClick(amount) => player.set_income_per_click(amount),
            Self::SetIncomePerSec(amount) => player.set_income_per_sec(amount),
            Self::AddMoney(delta) => player.add_money(delta),
            Self::Reset => player.reset(),
            Self::IssueCertificate(now) => player.issue_certificate(now),
        }
    }
}

/// Result of one income tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncomeReport {
    /// Players whose balance was credited.
    pub players_credited: usize,
    /// Sum of all credits.
    pub total_credited: Money,
    /// Portfolios whose ledger record does not exist.
    pub orphaned: Vec<PlayerKey>,
}

/// Result of a settled casino spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpinSettlement {
    /// The resolved spin.
    pub outcome: SpinOutcome,
    /// Balance after the bet was taken and any payout credited.
    pub balance_after: Money,
    /// Casino statistics after recording the spin.
    pub stats: CasinoStats,
}

/// Result of a flush.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Domains written to disk.
    pub written: Vec<Domain>,
}

/// The storage trait defining all economy operations.
///
/// Compound operations (upgrade, purchase, spin settlement, income accrual)
/// check and mutate under one lock, so each is atomic with respect to other
/// callers.
pub trait Store: Send + Sync {
    // =========================================================================
    // Ledger Operations
    // =========================================================================

    /// Create a player with starting values.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PlayerAlreadyExists` if the key is taken.
    fn create_player(&self, key: PlayerKey, now: DateTime<Utc>) -> Result<PlayerRecord>;

    /// Get a player record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn get_player(&self, key: PlayerKey) -> Result<Option<PlayerRecord>>;

    /// Apply a single-field change to a player.
    ///
    /// Returns the record after the change.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PlayerNotFound` if the player doesn't exist.
    fn update_player(&self, key: PlayerKey, change: PlayerChange) -> Result<PlayerRecord>;

    /// Register a click.
    ///
    /// # Errors
    ///
    /// - `StoreError::PlayerNotFound` if the player doesn't exist.
    /// - `StoreError::Rejected` with `ClickCooldown` if clicked too soon.
    fn record_click(
        &self,
        key: PlayerKey,
        now: DateTime<Utc>,
        cooldown: Duration,
    ) -> Result<ClickReceipt>;

    /// Buy one upgrade.
    ///
    /// # Errors
    ///
    /// - `StoreError::PlayerNotFound` if the player doesn't exist.
    /// - `StoreError::Rejected` with `InsufficientFunds` if the player cannot pay.
    fn upgrade(
        &self,
        key: PlayerKey,
        track: UpgradeTrack,
        pricing: &UpgradePricing,
    ) -> Result<UpgradeReceipt>;

    /// List all players of a server, in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn list_players(&self, server_id: ServerId) -> Result<Vec<PlayerRecord>>;

    // =========================================================================
    // Business Operations
    // =========================================================================

    /// Get a player's portfolio (empty if they own nothing).
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn get_portfolio(&self, key: PlayerKey) -> Result<Portfolio>;

    /// Buy one unit of a business: debit the price and add the unit atomically.
    ///
    /// # Errors
    ///
    /// - `StoreError::PlayerNotFound` if the player doesn't exist.
    /// - `StoreError::Rejected` with `InsufficientFunds` if the player cannot pay.
    fn buy_business(
        &self,
        key: PlayerKey,
        kind: &BusinessKind,
        now: DateTime<Utc>,
    ) -> Result<PurchaseReceipt>;

    /// Delete all of a player's holdings. Succeeds when there are none.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn reset_businesses(&self, key: PlayerKey) -> Result<()>;

    /// Run one income tick: credit every player the profit of their holdings.
    ///
    /// Portfolios without a ledger record are skipped and listed in the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn accrue_income(&self) -> Result<IncomeReport>;

    // =========================================================================
    // Casino Operations
    // =========================================================================

    /// Get a player's casino statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn get_casino_stats(&self, key: PlayerKey) -> Result<Option<CasinoStats>>;

    /// Settle a spin: take the bet, resolve against `draw`, credit any payout
    /// and record statistics, atomically.
    ///
    /// # Errors
    ///
    /// - `StoreError::PlayerNotFound` if the player doesn't exist.
    /// - `StoreError::Rejected` with `InsufficientFunds` if the bet is no longer covered.
    fn settle_spin(&self, key: PlayerKey, ticket: &SpinTicket, draw: u8)
        -> Result<SpinSettlement>;

    /// Delete a player's casino statistics. Succeeds when there are none.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn reset_casino_stats(&self, key: PlayerKey) -> Result<()>;

    // =========================================================================
    // Milk Jar Operations
    // =========================================================================

    /// Get a player's jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn get_jar(&self, key: PlayerKey) -> Result<Option<JarProgress>>;

    /// Add one step to a player's jar, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn fill_jar(&self, key: PlayerKey, now: DateTime<Utc>) -> Result<JarProgress>;

    /// Empty a player's jar, keeping the lifetime total.
    ///
    /// Returns `None` if the player never had a jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn empty_jar(&self, key: PlayerKey, now: DateTime<Utc>) -> Result<Option<JarProgress>>;

    // =========================================================================
    // Admin Operations
    // =========================================================================

    /// List users with admin rights.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn list_admins(&self) -> Result<Vec<UserId>>;

    /// Grant admin rights. Returns `false` if the user already had them.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn grant_admin(&self, user_id: UserId) -> Result<bool>;

    /// Revoke admin rights. Returns `false` if the user did not have them.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn revoke_admin(&self, user_id: UserId) -> Result<bool>;

    /// Reset a player's ledger record and delete their holdings and casino
    /// statistics in one step. The jar is kept.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PlayerNotFound` if the player has no record.
    fn reset_player(&self, key: PlayerKey) -> Result<PlayerRecord>;

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write every dirty domain to durable storage.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` or `StoreError::Serialization` if a document
    /// cannot be written; the domain stays dirty and is retried next flush.
    fn flush(&self) -> Result<FlushReport>;
}
