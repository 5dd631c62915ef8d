//! Upstream extraction record
//!
//! The extraction service returns a JSON-shaped record describing the
//! policy and the bill. Model output is not always clean JSON: it often
//! arrives fenced in Markdown or wrapped in explanatory prose, so
//! [`ExtractedClaimRecord::from_payload`] strips those wrappers before
//! deserializing. Field-level validation happens in `validate`, not
//! here; the DTOs deliberately accept any well-typed record so a missing
//! field can be reported by name instead of as a deserialization error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Currency;
use domain_policy::ServiceCategory;

use crate::error::ExtractionError;

/// One bill row as reported by the extraction service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedBillItem {
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub is_covered: Option<bool>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub category: Option<ServiceCategory>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// The whole claim record as reported by the extraction service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedClaimRecord {
    pub policy_name: Option<String>,
    pub copay_percentage: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub client_address: Option<String>,
    #[serde(default)]
    pub covered_services: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    pub bill_items: Option<Vec<ExtractedBillItem>>,
}

impl ExtractedClaimRecord {
    /// Parses a record out of raw extraction-service output
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::NoJsonPayload` when the payload holds no
    /// JSON object and `ExtractionError::MalformedPayload` when the
    /// object does not deserialize as a record.
    pub fn from_payload(raw: &str) -> Result<Self, ExtractionError> {
        let json = payload::extract_json(raw)?;
        serde_json::from_str(json)
            .map_err(|e| ExtractionError::MalformedPayload(e.to_string()))
    }
}

/// Cleanup of raw model output before JSON parsing
pub mod payload {
    use crate::error::ExtractionError;

    /// Isolates the outermost JSON object in raw model output
    ///
    /// Strips a leading ```` ```json ```` or ```` ``` ```` fence and a
    /// trailing fence, then slices from the first `{` to the last `}`.
    /// Prose before or after the object is discarded.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::NoJsonPayload` when no `{...}` span
    /// exists in the payload.
    pub fn extract_json(raw: &str) -> Result<&str, ExtractionError> {
        let mut text = raw.trim();
        if let Some(rest) = text.strip_prefix("```json") {
            text = rest;
        } else if let Some(rest) = text.strip_prefix("```") {
            text = rest;
        }
        if let Some(rest) = text.strip_suffix("```") {
            text = rest;
        }
        let text = text.trim();

        let start = text.find('{').ok_or(ExtractionError::NoJsonPayload)?;
        let end = text.rfind('}').ok_or(ExtractionError::NoJsonPayload)?;
        if end < start {
            return Err(ExtractionError::NoJsonPayload);
        }
        Ok(&text[start..=end])
    }
}
