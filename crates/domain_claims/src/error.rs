//! Claims domain errors

use thiserror::Error;

use domain_policy::PolicyError;

/// Errors that can occur in the claims domain
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClaimError {
    /// Bill item fields failed validation
    #[error("Invalid item data: {reason}")]
    InvalidItemData { reason: String },

    /// Policy fields failed validation
    #[error("Invalid policy data: {0}")]
    InvalidPolicyData(#[from] PolicyError),

    /// Item index does not exist on this claim
    #[error("Item index {index} is out of range for a claim with {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ClaimError {
    /// Creates an invalid-item error
    pub fn invalid_item(reason: impl Into<String>) -> Self {
        ClaimError::InvalidItemData {
            reason: reason.into(),
        }
    }
}
