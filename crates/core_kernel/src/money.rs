//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal, so claim amounts never touch floating point.
//! Amounts are stored at full precision; rounding is always an explicit
//! operation, and the system-wide rounding rule for user-facing amounts
//! is round-half-up at currency precision.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Returns the number of minor-unit digits for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }
}

impl Default for Currency {
    /// Claims are denominated in rupees unless a record says otherwise.
    fn default() -> Self {
        Currency::INR
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount with associated currency
///
/// Money keeps its amount at full decimal precision. Derived amounts
/// (copay application, unit costs) stay exact until the caller rounds,
/// which guarantees that the half-up rounding of a user-facing figure
/// happens exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates Money from an integer amount in minor units (e.g., paise)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        let divisor = Decimal::new(10_i64.pow(currency.decimal_places()), 0);
        Self::new(Decimal::new(minor_units, 0) / divisor, currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
            currency: self.currency,
        }
    }

    /// Rounds half-up at the given number of decimal places
    ///
    /// This is the single rounding rule used for every user-facing amount
    /// in the system; midpoints round away from zero (0.005 becomes 0.01).
    pub fn round_half_up(&self, dp: u32) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
            currency: self.currency,
        }
    }

    /// Rounds half-up to the currency's standard decimal places
    pub fn round_to_currency(&self) -> Self {
        self.round_half_up(self.currency.decimal_places())
    }

    /// Checked addition that fails on currency mismatch or overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Checked subtraction that fails on currency mismatch or overflow
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Multiplies by a scalar (e.g., for copay application)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency)
    }

    /// Divides by a scalar
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Self::new(self.amount / divisor, self.currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.round_to_currency().amount,
            dp = dp as usize
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch in Money::sub")
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount, self.currency)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}

impl Div<Decimal> for Money {
    type Output = Self;

    fn div(self, divisor: Decimal) -> Self {
        self.divide(divisor).expect("Division by zero in Money::div")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation_keeps_full_precision() {
        let m = Money::new(dec!(100.123456789), Currency::INR);
        assert_eq!(m.amount(), dec!(100.123456789));
        assert_eq!(m.currency(), Currency::INR);
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(10050, Currency::INR);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00), Currency::INR);
        let b = Money::new(dec!(50.00), Currency::INR);

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
    }

    #[test]
    fn test_currency_mismatch() {
        let inr = Money::new(dec!(100.00), Currency::INR);
        let usd = Money::new(dec!(100.00), Currency::USD);

        let result = inr.checked_add(&usd);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_round_half_up_midpoint_goes_up() {
        let m = Money::new(dec!(80.005), Currency::INR);
        assert_eq!(m.round_half_up(2).amount(), dec!(80.01));

        // Banker's rounding would give 0.12 here; the system rule gives 0.13.
        let m = Money::new(dec!(0.125), Currency::INR);
        assert_eq!(m.round_half_up(2).amount(), dec!(0.13));
    }

    #[test]
    fn test_round_half_up_below_midpoint_goes_down() {
        let m = Money::new(dec!(80.00499), Currency::INR);
        assert_eq!(m.round_half_up(2).amount(), dec!(80.00));
    }

    #[test]
    fn test_round_to_currency_uses_minor_units() {
        let inr = Money::new(dec!(12.345), Currency::INR);
        assert_eq!(inr.round_to_currency().amount(), dec!(12.35));

        let jpy = Money::new(dec!(12.5), Currency::JPY);
        assert_eq!(jpy.round_to_currency().amount(), dec!(13));
    }

    #[test]
    fn test_display_formats_symbol_and_minor_units() {
        let m = Money::new(dec!(1499.5), Currency::INR);
        assert_eq!(m.to_string(), "₹ 1499.50");
    }

    #[test]
    fn test_default_currency_is_inr() {
        assert_eq!(Currency::default(), Currency::INR);
    }

    #[test]
    fn test_divide_by_zero_fails() {
        let m = Money::new(dec!(10.00), Currency::INR);
        assert_eq!(m.divide(dec!(0)), Err(MoneyError::DivisionByZero));
    }
}
