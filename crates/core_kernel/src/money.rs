//! Monetary amounts with precise decimal arithmetic
//!
//! Claim amounts are never negative. `Amount` enforces that at construction
//! and on deserialization, so a value that exists is always valid.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use thiserror::Error;

/// Number of decimal places amounts are rounded to
pub const AMOUNT_SCALE: u32 = 2;

/// Errors that can occur when building amounts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A non-negative monetary amount
///
/// Stored rounded to [`AMOUNT_SCALE`] decimal places using banker's rounding,
/// matching how the storage layer keeps `NUMERIC(12, 2)` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a new amount, rejecting negative values
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::NegativeAmount` if `value` is below zero
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::NegativeAmount(value));
        }
        if value.is_zero() {
            return Ok(Self::zero());
        }
        Ok(Self(value.round_dp(AMOUNT_SCALE)))
    }

    /// Zero amount
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Decimal {
        amount.0
    }
}

impl std::str::FromStr for Amount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Decimal = s
            .trim()
            .parse()
            .map_err(|_| MoneyError::InvalidAmount(s.to_string()))?;
        Self::new(value)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_rounds_to_cents() {
        let amount = Amount::new(dec!(10.125)).unwrap();
        assert_eq!(amount.value(), dec!(10.12));
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert_eq!(
            Amount::new(dec!(-0.01)),
            Err(MoneyError::NegativeAmount(dec!(-0.01)))
        );
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let amount = Amount::new(dec!(-0.00)).unwrap();
        assert!(amount.is_zero());
    }
}
