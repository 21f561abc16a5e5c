//! Non-negative fixed-point money.
//!
//! Balances are whole coins most of the time, but passive business income is
//! 0.25 % of a price per tick, so a balance may carry a fraction. Amounts are
//! stored as `i64` units of 1/10 000 coin, which keeps that profit exact
//! for any whole-coin price.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Units per coin.
pub const MONEY_SCALE: i64 = 10_000;

/// A non-negative amount of money.
///
/// Every constructor and arithmetic operation clamps at zero, so a `Money`
/// value is never negative.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero coins.
    pub const ZERO: Self = Self(0);

    /// Create an amount from raw units, clamping negatives to zero.
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        if units < 0 {
            Self(0)
        } else {
            Self(units)
        }
    }

    /// Create an amount of whole coins, clamping negatives to zero.
    #[must_use]
    pub const fn coins(coins: i64) -> Self {
        Self::from_units(coins.saturating_mul(MONEY_SCALE))
    }

    /// Create an amount from a float number of coins (rounded to the nearest unit).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_f64(coins: f64) -> Self {
        // `as` saturates on overflow and maps NaN to zero.
        Self::from_units((coins * MONEY_SCALE as f64).round() as i64)
    }

    /// Raw units.
    #[must_use]
    pub const fn units(self) -> i64 {
        self.0
    }

    /// Whole coins, rounded down.
    #[must_use]
    pub const fn whole_coins(self) -> i64 {
        self.0 / MONEY_SCALE
    }

    /// Value as a float number of coins.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / MONEY_SCALE as f64
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtract, or `None` if `other` is larger than `self`.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        if self.0 >= other.0 {
            Some(Self(self.0 - other.0))
        } else {
            None
        }
    }

    /// Subtract, stopping at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self::from_units(self.0.saturating_sub(other.0))
    }

    /// Add, stopping at the maximum representable amount.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Apply a signed change in whole coins, clamping at zero.
    #[must_use]
    pub const fn offset_coins(self, delta: i64) -> Self {
        Self::from_units(self.0.saturating_add(delta.saturating_mul(MONEY_SCALE)))
    }

    /// Multiply by a count, stopping at the maximum representable amount.
    #[must_use]
    pub fn times(self, count: u64) -> Self {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        Self(self.0.saturating_mul(count))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Money({self})")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / MONEY_SCALE;
        let frac = self.0 % MONEY_SCALE;
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{frac:04}");
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % MONEY_SCALE == 0 {
            serializer.serialize_i64(self.whole_coins())
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number of coins")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money::coins(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money::coins(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Ok(Money::from_f64(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_amounts_clamp_to_zero() {
        assert_eq!(Money::coins(-5), Money::ZERO);
        assert_eq!(Money::from_units(-1), Money::ZERO);
        assert_eq!(Money::coins(10).offset_coins(-25), Money::ZERO);
        assert_eq!(Money::coins(10).saturating_sub(Money::coins(11)), Money::ZERO);
    }

    #[test]
    fn checked_sub_requires_enough() {
        let balance = Money::coins(50);
        assert_eq!(balance.checked_sub(Money::coins(50)), Some(Money::ZERO));
        assert_eq!(balance.checked_sub(Money::coins(51)), None);
    }

    #[test]
    fn never_negative_over_mixed_sequence() {
        let mut balance = Money::ZERO;
        for delta in [5, -3, -10, 100, -99, -1, -1, 7] {
            balance = balance.offset_coins(delta);
            assert!(balance.units() >= 0);
        }
        assert_eq!(balance, Money::coins(7));
    }

    #[test]
    fn display_trims_fraction() {
        assert_eq!(Money::coins(1200).to_string(), "1200");
        assert_eq!(Money::from_units(125_000).to_string(), "12.5");
        assert_eq!(Money::from_units(10_025).to_string(), "1.0025");
    }

    #[test]
    fn serializes_whole_as_integer_and_fraction_as_float() {
        assert_eq!(serde_json::to_string(&Money::coins(40)).unwrap(), "40");
        assert_eq!(
            serde_json::to_string(&Money::from_units(125_000)).unwrap(),
            "12.5"
        );
    }

    #[test]
    fn deserializes_integers_and_floats() {
        let whole: Money = serde_json::from_str("300").unwrap();
        let frac: Money = serde_json::from_str("12.5").unwrap();
        let negative: Money = serde_json::from_str("-4").unwrap();
        assert_eq!(whole, Money::coins(300));
        assert_eq!(frac, Money::from_units(125_000));
        assert_eq!(negative, Money::ZERO);
    }

    #[test]
    fn sum_and_times() {
        let total: Money = [Money::coins(1), Money::coins(2), Money::coins(3)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::coins(6));
        assert_eq!(Money::coins(20).times(2), Money::coins(40));
    }
}
