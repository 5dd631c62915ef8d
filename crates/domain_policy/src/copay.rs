//! Copay rate value object
//!
//! The copay percentage is the share of covered cost the patient pays out
//! of pocket. It is validated at construction: values outside [0, 100] are
//! rejected, never clamped, so invalid extraction output cannot silently
//! distort money math.

use core_kernel::Money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PolicyError;

/// A validated copay percentage in the inclusive range [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct CopayRate {
    percentage: Decimal,
}

impl CopayRate {
    /// Creates a copay rate from a percentage (e.g., 20 for 20%)
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::CopayOutOfRange` when the value is negative
    /// or greater than 100.
    pub fn new(percentage: Decimal) -> Result<Self, PolicyError> {
        if percentage < dec!(0) || percentage > dec!(100) {
            return Err(PolicyError::CopayOutOfRange { value: percentage });
        }
        Ok(Self { percentage })
    }

    /// A 0% copay (the policy pays the full covered amount)
    pub fn zero() -> Self {
        Self {
            percentage: dec!(0),
        }
    }

    /// Returns the rate as a percentage (e.g., 20)
    pub fn percentage(&self) -> Decimal {
        self.percentage
    }

    /// Returns the rate as a fraction (e.g., 0.20)
    pub fn fraction(&self) -> Decimal {
        self.percentage / dec!(100)
    }

    /// The patient's share of a covered amount, at full precision
    pub fn patient_share(&self, covered: &Money) -> Money {
        covered.multiply(self.fraction())
    }

    /// The insurer's share of a covered amount, at full precision
    pub fn insurer_share(&self, covered: &Money) -> Money {
        covered.multiply(dec!(1) - self.fraction())
    }
}

impl TryFrom<Decimal> for CopayRate {
    type Error = PolicyError;

    fn try_from(percentage: Decimal) -> Result<Self, Self::Error> {
        Self::new(percentage)
    }
}

impl From<CopayRate> for Decimal {
    fn from(rate: CopayRate) -> Decimal {
        rate.percentage
    }
}

impl fmt::Display for CopayRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage.normalize())
    }
}
