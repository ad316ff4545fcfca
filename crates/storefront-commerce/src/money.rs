//! Money type for representing prices and totals.
//!
//! The API exchanges prices as plain decimal numbers in baht. Internally they
//! are held as integer satang so that line totals and subtotals add up
//! exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Number of minor units per major unit (satang per baht).
const MINOR_PER_MAJOR: i64 = 100;

/// Display symbol for the storefront currency.
pub const CURRENCY_SYMBOL: &str = "\u{0e3f}";

/// A monetary amount in the storefront currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money {
    /// Amount in minor units (satang).
    pub amount_minor: i64,
}

impl Money {
    /// Create a Money value from minor units.
    pub fn new(amount_minor: i64) -> Self {
        Self { amount_minor }
    }

    /// Create a Money value from a decimal amount in major units.
    ///
    /// ```
    /// use storefront_commerce::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.amount_minor, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * MINOR_PER_MAJOR as f64).round() as i64)
    }

    /// Zero baht.
    pub fn zero() -> Self {
        Self::new(0)
    }

    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value in major units.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / MINOR_PER_MAJOR as f64
    }

    /// Format as a display string (e.g., "฿49.99").
    pub fn display(&self) -> String {
        format!("{}{:.2}", CURRENCY_SYMBOL, self.to_decimal())
    }

    /// Add another amount, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_minor.checked_add(other.amount_minor).map(Money::new)
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, quantity: u32) -> Option<Money> {
        self.amount_minor
            .checked_mul(i64::from(quantity))
            .map(Money::new)
    }

    /// Sum an iterator of amounts, returning None on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_minor.saturating_add(other.amount_minor))
    }
}

impl TryFrom<f64> for Money {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(format!("amount must be a finite number, got {}", value));
        }
        Ok(Money::from_decimal(value))
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> f64 {
        money.to_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(1290.5).amount_minor, 129050);
        assert_eq!(Money::from_decimal(0.0), Money::zero());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999).display(), "\u{0e3f}49.99");
        assert_eq!(Money::new(120000).to_string(), "\u{0e3f}1200.00");
    }

    #[test]
    fn test_money_multiply() {
        let price = Money::from_decimal(350.0);
        assert_eq!(price.try_multiply(3), Some(Money::from_decimal(1050.0)));
        assert_eq!(Money::new(i64::MAX).try_multiply(2), None);
    }

    #[test]
    fn test_money_sum() {
        let amounts = [Money::new(100), Money::new(250), Money::new(5)];
        assert_eq!(Money::try_sum(amounts.iter()), Some(Money::new(355)));
        let empty: [Money; 0] = [];
        assert_eq!(Money::try_sum(empty.iter()), Some(Money::zero()));

        let overflowing = [Money::new(i64::MAX), Money::new(1)];
        assert_eq!(Money::try_sum(overflowing.iter()), None);
    }

    #[test]
    fn test_money_wire_format_is_major_units() {
        let m: Money = serde_json::from_str("1290").unwrap();
        assert_eq!(m.amount_minor, 129000);
        assert_eq!(serde_json::to_string(&Money::new(4999)).unwrap(), "49.99");
    }
}
