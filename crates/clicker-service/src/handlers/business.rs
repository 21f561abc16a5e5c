//! Business handlers.

use chrono::Utc;
use serde::Serialize;

use clicker_core::{BusinessHolding, BusinessKind, Money, PlayerKey, PurchaseReceipt, CATALOG};
use clicker_store::Store;

use crate::auth::AdminAuth;
use crate::error::ServiceError;
use crate::state::AppState;

/// One purchasable business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// 1-based number used to buy it.
    pub number: usize,
    /// Catalog key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Price of one unit.
    pub price: Money,
    /// Profit of one unit per income tick.
    pub profit_per_tick: Money,
}

/// The business catalog in purchase order.
#[must_use]
pub fn catalog() -> Vec<CatalogEntry> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(index, kind)| CatalogEntry {
            number: index + 1,
            key: kind.key,
            name: kind.name,
            price: kind.price(),
            profit_per_tick: kind.profit_per_tick(),
        })
        .collect()
}

/// Buy one unit of the business with the given catalog number.
pub fn buy(
    state: &AppState,
    key: PlayerKey,
    number: usize,
) -> Result<PurchaseReceipt, ServiceError> {
    let kind = BusinessKind::by_number(number)?;
    let receipt = state.store.buy_business(key, kind, Utc::now())?;
    tracing::info!(
        %key,
        business = kind.key,
        count = receipt.count,
        balance = %receipt.balance_after,
        "Business bought"
    );
    Ok(receipt)
}

/// A holding as shown to the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingResponse {
    /// Catalog key.
    pub business_key: String,
    /// Display name.
    pub name: String,
    /// Units owned.
    pub count: u64,
    /// Profit of all units per tick.
    pub profit_per_tick: Money,
}

impl From<&BusinessHolding> for HoldingResponse {
    fn from(holding: &BusinessHolding) -> Self {
        Self {
            business_key: holding.business_key.clone(),
            name: holding.name.clone(),
            count: holding.count,
            profit_per_tick: holding.profit_per_tick(),
        }
    }
}

/// Portfolio response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioResponse {
    /// Holdings in key order.
    pub holdings: Vec<HoldingResponse>,
    /// Units owned across all businesses.
    pub unit_count: u64,
    /// Profit credited every income tick.
    pub profit_per_tick: Money,
    /// Seconds between income ticks.
    pub interval_secs: u64,
}

/// Show a player's businesses.
pub fn portfolio(state: &AppState, key: PlayerKey) -> Result<PortfolioResponse, ServiceError> {
    let portfolio = state.store.get_portfolio(key)?;
    Ok(PortfolioResponse {
        holdings: portfolio.holdings().map(HoldingResponse::from).collect(),
        unit_count: portfolio.unit_count(),
        profit_per_tick: portfolio.profit_per_tick(),
        interval_secs: state.config.income_interval_secs,
    })
}

/// Profit a player earns per income tick.
pub fn profit_per_tick(state: &AppState, key: PlayerKey) -> Result<Money, ServiceError> {
    Ok(state.store.get_portfolio(key)?.profit_per_tick())
}

/// Delete all of a player's businesses (admin only).
pub fn reset(state: &AppState, auth: &AdminAuth, key: PlayerKey) -> Result<(), ServiceError> {
    state.store.reset_businesses(key)?;
    tracing::info!(admin = %auth.user_id, %key, "Businesses reset");
    Ok(())
}
