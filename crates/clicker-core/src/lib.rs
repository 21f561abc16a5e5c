//! Core types and rules for the clicker economy.
//!
//! This crate provides the foundational types used throughout the bot:
//!
//! - **Identifiers**: `UserId`, `ServerId`, `PlayerKey`
//! - **Money**: `Money`, a non-negative fixed-point amount
//! - **Ledger**: `PlayerRecord`, clicks and upgrades
//! - **Pricing**: `UpgradePricing`, `UpgradeTrack`
//! - **Businesses**: `BusinessKind`, `BusinessHolding`, `Portfolio`
//! - **Casino**: `CasinoPlay`, `SpinTicket`, `SpinOutcome`, `CasinoStats`
//! - **Milk jar**: `JarProgress`
//!
//! Nothing in this crate performs I/O. Persistence lives in `clicker-store`.
//!
//! # Money unit
//!
//! **1 coin = 10 000 units**
//!
//! - Clicks, upgrades and bets move whole coins
//! - Business profit is 0.25 % of the price per tick, which is exact in units
//! - Stored as `i64` units and clamped at zero

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod business;
pub mod casino;
pub mod error;
pub mod ids;
pub mod jar;
pub mod money;
pub mod player;
pub mod pricing;
pub mod timestamp;

pub use business::{
    BusinessHolding, BusinessKind, Portfolio, PurchaseReceipt, CATALOG, INCOME_INTERVAL_SECS,
    PROFIT_RATE_BASIS_POINTS,
};
pub use casino::{
    draw_spin, BetColor, CasinoPlay, CasinoStats, Multiplier, SpinOutcome, SpinTicket, MIN_BET,
};
pub use error::{EconomyError, Result};
pub use ids::{IdError, PlayerKey, ServerId, UserId};
pub use jar::{JarProgress, JAR_CAPACITY, JAR_STEP};
pub use money::{Money, MONEY_SCALE};
pub use player::{ClickReceipt, PlayerRecord, UpgradeReceipt, DEFAULT_CLICK_COOLDOWN_MS};
pub use pricing::{UpgradePricing, UpgradeTrack, UPGRADE_GROWTH};
