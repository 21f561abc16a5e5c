//! Businesses: passive-income assets.
//!
//! Players buy units of businesses from a fixed catalog. Every income tick
//! each unit pays 0.25 % of its price.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EconomyError, Result};
use crate::money::Money;

// ============================================================================
// Constants
// ============================================================================

/// Profit per tick as basis points of the unit price (0.25 %).
pub const PROFIT_RATE_BASIS_POINTS: i64 = 25;

/// Seconds between two income ticks.
pub const INCOME_INTERVAL_SECS: u64 = 15;

const BASIS_POINTS: i64 = 10_000;

/// A business that can be bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessKind {
    /// Stable key used in persisted holdings.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Price of one unit in whole coins.
    pub price: i64,
}

impl BusinessKind {
    /// Price of one unit.
    #[must_use]
    pub const fn price(&self) -> Money {
        Money::coins(self.price)
    }

    /// Profit of one unit per tick.
    #[must_use]
    pub fn profit_per_tick(&self) -> Money {
        profit_per_tick(self.price(), 1)
    }

    /// Look up a business by its 1-based catalog number.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::UnknownBusiness` if the number is out of range.
    pub fn by_number(number: usize) -> Result<&'static Self> {
        number
            .checked_sub(1)
            .and_then(|index| CATALOG.get(index))
            .ok_or(EconomyError::UnknownBusiness { number })
    }

    /// Look up a business by key.
    #[must_use]
    pub fn by_key(key: &str) -> Option<&'static Self> {
        CATALOG.iter().find(|kind| kind.key == key)
    }
}

/// The business catalog, in display order.
pub static CATALOG: [BusinessKind; 10] = [
    BusinessKind { key: "park", name: "Park", price: 40_000 },
    BusinessKind { key: "offices", name: "Offices", price: 15_000 },
    BusinessKind { key: "tattoo", name: "Tattoo Parlor", price: 8_000 },
    BusinessKind { key: "supermarket", name: "Grocery Store", price: 14_500 },
    BusinessKind { key: "school", name: "Private School", price: 60_000 },
    BusinessKind { key: "hospital", name: "Private Hospital", price: 105_000 },
    BusinessKind { key: "electronics", name: "Electronics Store", price: 9_000 },
    BusinessKind { key: "barber", name: "Barbershop", price: 5_000 },
    BusinessKind { key: "stationery", name: "Stationery Shop", price: 5_000 },
    BusinessKind { key: "playground", name: "Private Playground", price: 43_000 },
];

/// Profit per tick of `count` units priced at `unit_price`.
///
/// `unit_price * 0.0025 * count`, exact for whole-coin prices.
#[must_use]
pub fn profit_per_tick(unit_price: Money, count: u64) -> Money {
    let per_unit = unit_price.units().saturating_mul(PROFIT_RATE_BASIS_POINTS) / BASIS_POINTS;
    Money::from_units(per_unit).times(count)
}

/// Units of one business owned by a player.
///
/// Older documents store the unit price as `price` and omit the key; the
/// key is filled in from the portfolio map when a [`Portfolio`] is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHolding {
    /// Catalog key.
    #[serde(default)]
    pub business_key: String,

    /// Display name at purchase time.
    #[serde(default)]
    pub name: String,

    /// Price of one unit at purchase time.
    #[serde(default, alias = "price")]
    pub unit_price: Money,

    /// Units owned (at least 1).
    #[serde(default = "one_unit")]
    pub count: u64,

    /// When the first unit was bought.
    #[serde(with = "crate::timestamp")]
    pub bought_at: DateTime<Utc>,
}

const fn one_unit() -> u64 {
    1
}

impl BusinessHolding {
    /// Profit of this holding per tick.
    #[must_use]
    pub fn profit_per_tick(&self) -> Money {
        profit_per_tick(self.unit_price, self.count)
    }

    /// Fill fields an older document left out, using the map key and the
    /// catalog entry for it.
    fn backfill(&mut self, key: &str) {
        if self.business_key.is_empty() {
            self.business_key = key.to_string();
        }
        if let Some(kind) = BusinessKind::by_key(&self.business_key) {
            if self.name.is_empty() {
                self.name = kind.name.to_string();
            }
            if self.unit_price.is_zero() {
                self.unit_price = kind.price();
            }
        }
    }
}

/// All holdings of one player, keyed by business key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Portfolio {
    holdings: BTreeMap<String, BusinessHolding>,
}

impl<'de> Deserialize<'de> for Portfolio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut holdings = BTreeMap::<String, BusinessHolding>::deserialize(deserializer)?;
        for (key, holding) in &mut holdings {
            holding.backfill(key);
        }
        Ok(Self { holdings })
    }
}

impl Portfolio {
    /// Add one unit of `kind`, creating the holding on first purchase.
    pub fn add_unit(&mut self, kind: &BusinessKind, now: DateTime<Utc>) -> &BusinessHolding {
        self.holdings
            .entry(kind.key.to_string())
            .and_modify(|holding| holding.count = holding.count.saturating_add(1))
            .or_insert_with(|| BusinessHolding {
                business_key: kind.key.to_string(),
                name: kind.name.to_string(),
                unit_price: kind.price(),
                count: 1,
                bought_at: now,
            })
    }

    /// Get a holding by business key.
    #[must_use]
    pub fn get(&self, business_key: &str) -> Option<&BusinessHolding> {
        self.holdings.get(business_key)
    }

    /// Iterate over holdings in key order.
    pub fn holdings(&self) -> impl Iterator<Item = &BusinessHolding> {
        self.holdings.values()
    }

    /// Whether the player owns nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Total profit of all holdings per tick.
    #[must_use]
    pub fn profit_per_tick(&self) -> Money {
        self.holdings().map(BusinessHolding::profit_per_tick).sum()
    }

    /// Total number of units owned.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.holdings().map(|holding| holding.count).sum()
    }
}

/// Result of a business purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseReceipt {
    /// Catalog key of the business bought.
    pub business_key: String,
    /// Price paid.
    pub price: Money,
    /// Units owned after the purchase.
    pub count: u64,
    /// Profit per tick of one unit.
    pub profit_per_tick: Money,
    /// Balance after paying.
    pub balance_after: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::MONEY_SCALE as COIN;

    #[test]
    fn catalog_numbers_are_one_based() {
        assert_eq!(BusinessKind::by_number(1).unwrap().key, "park");
        assert_eq!(BusinessKind::by_number(10).unwrap().key, "playground");
        assert_eq!(
            BusinessKind::by_number(0),
            Err(EconomyError::UnknownBusiness { number: 0 })
        );
        assert_eq!(
            BusinessKind::by_number(11),
            Err(EconomyError::UnknownBusiness { number: 11 })
        );
    }

    #[test]
    fn catalog_keys_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn two_tattoo_parlors_earn_forty_per_tick() {
        let profit = profit_per_tick(Money::coins(8_000), 2);
        assert_eq!(profit, Money::coins(40));
    }

    #[test]
    fn fractional_profit_is_exact() {
        // 14 500 * 0.0025 = 36.25
        let grocery = BusinessKind::by_key("supermarket").unwrap();
        assert_eq!(grocery.profit_per_tick(), Money::from_units(36 * COIN + COIN / 4));
    }

    #[test]
    fn repeat_purchase_increments_count() {
        let mut portfolio = Portfolio::default();
        let tattoo = BusinessKind::by_key("tattoo").unwrap();
        let now = Utc::now();

        portfolio.add_unit(tattoo, now);
        let holding = portfolio.add_unit(tattoo, now);
        assert_eq!(holding.count, 2);
        assert_eq!(holding.unit_price, Money::coins(8_000));
        assert_eq!(portfolio.unit_count(), 2);
    }

    #[test]
    fn portfolio_profit_is_additive() {
        let mut portfolio = Portfolio::default();
        let now = Utc::now();
        portfolio.add_unit(BusinessKind::by_key("tattoo").unwrap(), now);
        portfolio.add_unit(BusinessKind::by_key("tattoo").unwrap(), now);
        portfolio.add_unit(BusinessKind::by_key("barber").unwrap(), now);

        // 40 + 12.5
        assert_eq!(portfolio.profit_per_tick(), Money::from_units(525_000));
    }

    #[test]
    fn portfolio_serializes_as_map() {
        let mut portfolio = Portfolio::default();
        portfolio.add_unit(BusinessKind::by_key("barber").unwrap(), Utc::now());

        let json = serde_json::to_value(&portfolio).unwrap();
        assert_eq!(json["barber"]["count"], 1);
        assert_eq!(json["barber"]["unit_price"], 5_000);
    }

    #[test]
    fn portfolio_reads_holdings_without_key_or_unit_price() {
        let portfolio: Portfolio = serde_json::from_str(
            r#"{
                "tattoo": {
                    "name": "Tattoo Parlor",
                    "price": 8000,
                    "emoji": "x",
                    "count": 2,
                    "bought_at": "2024-05-01T12:34:56.789012"
                }
            }"#,
        )
        .unwrap();

        let holding = portfolio.get("tattoo").unwrap();
        assert_eq!(holding.business_key, "tattoo");
        assert_eq!(holding.unit_price, Money::coins(8_000));
        assert_eq!(portfolio.profit_per_tick(), Money::coins(40));
    }
}
