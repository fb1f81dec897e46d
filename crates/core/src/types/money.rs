//! Type-safe money representation using decimal arithmetic.
//!
//! The backend serializes all currency fields as decimal strings (e.g.
//! `"9.99"`), so `Money` round-trips through serde as a string and never
//! touches floating point.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A currency amount in dollars.
///
/// Arithmetic happens at full decimal precision; [`Money::rounded`] applies
/// the final half-up rounding to cents. Sums must round once at the end,
/// never per-term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::str")] Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money value from a raw decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a money value from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The raw decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Round to currency precision (2 decimal places, half-up).
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiply by an item quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl std::str::FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Decimal>().map(Self)
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, std::ops::Add::add)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("${:.2}", self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dollars(s: &str) -> Money {
        Money::new(Decimal::from_str(s).expect("valid decimal"))
    }

    #[test]
    fn test_parse() {
        let price: Money = "12.50".parse().expect("parse");
        assert_eq!(price, Money::from_cents(1250));
        assert!("twelve".parse::<Money>().is_err());
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(999), dollars("9.99"));
    }

    #[test]
    fn test_times_and_sum() {
        let total: Money = [dollars("9.99").times(2), dollars("3.50").times(1)]
            .into_iter()
            .sum();
        assert_eq!(total.rounded(), dollars("23.48"));
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(dollars("1.005").rounded(), dollars("1.01"));
        assert_eq!(dollars("1.004").rounded(), dollars("1.00"));
    }

    #[test]
    fn test_display() {
        assert_eq!(dollars("4.5").to_string(), "$4.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_serde_string_roundtrip() {
        let m: Money = serde_json::from_str("\"12.30\"").expect("parse money");
        assert_eq!(m, dollars("12.30"));
        assert_eq!(
            serde_json::to_string(&m).expect("serialize money"),
            "\"12.30\""
        );
    }
}
