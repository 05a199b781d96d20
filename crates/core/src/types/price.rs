//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the shop's single display currency.
///
/// Wraps a [`Decimal`] so that cart totals are exact sums - no binary
/// floating point drift, no rounding beyond what the decimal type itself
/// carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The extended price: unit price times quantity.
    #[must_use]
    pub fn extended(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_price() {
        let unit = Price::from(25_000_u32);
        assert_eq!(unit.extended(2), Price::from(50_000_u32));
        assert_eq!(unit.extended(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from(100_u32), Price::from(250_u32)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from(350_u32));
    }

    #[test]
    fn test_exact_decimal_arithmetic() {
        let unit = Price::new("0.10".parse().unwrap());
        // 0.10 * 3 must be exactly 0.30
        assert_eq!(unit.extended(3), Price::new("0.30".parse().unwrap()));
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::from(50_000_u32);
        let json = serde_json::to_string(&price).unwrap();
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
