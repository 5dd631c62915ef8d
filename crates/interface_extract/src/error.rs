//! Extraction boundary errors
//!
//! A record that fails any check here is rejected as a whole; no
//! partially validated claim ever reaches the engine.

use thiserror::Error;

use domain_claims::ClaimError;

/// Errors raised while validating an extraction record
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The payload contains no JSON object at all
    #[error("Extraction payload contains no JSON object")]
    NoJsonPayload,

    /// The payload is JSON-shaped but does not deserialize as a record
    #[error("Malformed extraction payload: {0}")]
    MalformedPayload(String),

    /// A required record field is absent or blank
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// A record field is present but invalid
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A bill item failed validation; the index is zero-based bill order
    #[error("Invalid bill item at index {index}: {source}")]
    InvalidItem { index: usize, source: ClaimError },
}

impl ExtractionError {
    /// Creates an invalid-field error
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        ExtractionError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an invalid-item error for the item at `index`
    pub fn invalid_item(index: usize, source: ClaimError) -> Self {
        ExtractionError::InvalidItem { index, source }
    }
}
