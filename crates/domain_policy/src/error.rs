//! Policy domain errors
//!
//! Failures in this module are the "invalid policy data" family: a claim
//! can never be calculated against a policy context that failed validation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the policy domain
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Copay percentage outside the inclusive 0-100 range
    #[error("Copay percentage must be between 0 and 100, got {value}")]
    CopayOutOfRange { value: Decimal },

    /// Required field is missing or blank
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Policy field failed validation
    #[error("Validation error: {0}")]
    Validation(String),
}

impl PolicyError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PolicyError::Validation(message.into())
    }

    /// Creates a missing-field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        PolicyError::MissingRequiredField(field.into())
    }
}
