//! Amount and Balance types
//!
//! Domain primitives for monetary values. Both are validated at construction
//! time so a negative value can never reach the processor.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when creating an Amount or Balance
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must not be negative (got {0})")]
    Negative(Decimal),

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

/// A non-negative monetary amount requested by a caller.
///
/// Zero is allowed: withdrawing nothing is a valid no-op.
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use finance_log::domain::Amount;
///
/// let amount: Amount = "600.0".parse().unwrap();
/// assert_eq!(amount.value(), Decimal::new(6000, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Create a new Amount.
    ///
    /// # Errors
    /// - `AmountError::Negative` if value < 0
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            return Err(AmountError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal =
            Decimal::from_str(s.trim()).map_err(|e| AmountError::ParseError(e.to_string()))?;
        Amount::new(decimal)
    }
}

/// Balance held by a single processor. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Balance(Decimal);

impl Balance {
    /// Create a new balance (zero or positive)
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            return Err(AmountError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Check if balance covers the requested amount
    pub fn is_sufficient_for(&self, amount: &Amount) -> bool {
        self.0 >= amount.value()
    }

    /// Subtract amount from balance, `None` if the result would go negative.
    pub fn checked_debit(&self, amount: &Amount) -> Option<Balance> {
        if !self.is_sufficient_for(amount) {
            return None;
        }
        Some(Self(self.0 - amount.value()))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Balance {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal =
            Decimal::from_str(s.trim()).map_err(|e| AmountError::ParseError(e.to_string()))?;
        Balance::new(decimal)
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_zero_allowed() {
        let amount = Amount::new(Decimal::ZERO).unwrap();
        assert_eq!(amount, Amount::zero());
    }

    #[test]
    fn test_amount_negative_rejected() {
        let amount = Amount::new(dec!(-0.01));
        assert!(matches!(amount, Err(AmountError::Negative(_))));
    }

    #[test]
    fn test_amount_from_str() {
        let amount: Amount = " 123.456 ".parse().unwrap();
        assert_eq!(amount.value(), dec!(123.456));

        let bad: Result<Amount, _> = "lots".parse();
        assert!(matches!(bad, Err(AmountError::ParseError(_))));
    }

    #[test]
    fn test_balance_keeps_scale_in_display() {
        let balance: Balance = "500.0".parse().unwrap();
        let withdraw: Amount = "200.0".parse().unwrap();

        let balance = balance.checked_debit(&withdraw).unwrap();
        assert_eq!(balance.to_string(), "300.0");
    }

    #[test]
    fn test_balance_insufficient() {
        let balance = Balance::new(dec!(50)).unwrap();
        let amount = Amount::new(dec!(100)).unwrap();

        assert!(!balance.is_sufficient_for(&amount));
        assert!(balance.checked_debit(&amount).is_none());
    }

    #[test]
    fn test_balance_exact_debit_reaches_zero() {
        let balance = Balance::new(dec!(75.5)).unwrap();
        let amount = Amount::new(dec!(75.5)).unwrap();

        let balance = balance.checked_debit(&amount).unwrap();
        assert!(balance.value().is_zero());
    }
}
