//! Whole-record validation
//!
//! Turns an [`ExtractedClaimRecord`] into a [`Claim`], or rejects the
//! record entirely. The classifier re-runs the coverage rules over every
//! item rather than trusting the extraction service's flags: a rules
//! rejection always stands, and a rejection reported by the service is
//! honoured even where the rules would have covered the item, so noisy
//! extraction can only ever make coverage narrower.

use tracing::debug;

use core_kernel::{Currency, Money};
use domain_claims::{classify_item, BillItem, Claim, ClaimError};
use domain_policy::{ClientDetails, CopayRate, PolicyContext};

use crate::error::ExtractionError;
use crate::record::{ExtractedBillItem, ExtractedClaimRecord};

impl ExtractedClaimRecord {
    /// Validates the record and builds a claim from it
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::MissingField` when a required field is
    /// absent or blank, `ExtractionError::InvalidField` when the copay is
    /// out of range, and `ExtractionError::InvalidItem` (carrying the
    /// zero-based index) when a bill item fails validation. The record is
    /// accepted or rejected as a whole.
    pub fn into_claim(self) -> Result<Claim, ExtractionError> {
        let policy_name = self
            .policy_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ExtractionError::MissingField {
                field: "policy_name",
            })?
            .to_string();

        let copay_percentage =
            self.copay_percentage
                .ok_or(ExtractionError::MissingField {
                    field: "copay_percentage",
                })?;
        let copay = CopayRate::new(copay_percentage)
            .map_err(|e| ExtractionError::invalid_field("copay_percentage", e.to_string()))?;

        let policy = PolicyContext::new(policy_name, copay)
            .map_err(|e| ExtractionError::invalid_field("policy_name", e.to_string()))?
            .with_client_details(ClientDetails {
                name: non_blank(self.client_name),
                policy_number: non_blank(self.policy_number),
                address: non_blank(self.client_address),
            })
            .with_covered_services(self.covered_services)
            .with_exclusions(self.exclusions);

        let raw_items = self.bill_items.ok_or(ExtractionError::MissingField {
            field: "bill_items",
        })?;
        let currency = self.currency.unwrap_or_default();

        let items = raw_items
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                build_item(raw, currency, &policy)
                    .map_err(|source| ExtractionError::invalid_item(index, source))
            })
            .collect::<Result<Vec<BillItem>, ExtractionError>>()?;

        debug!(
            policy = policy.policy_name(),
            item_count = items.len(),
            %currency,
            "extraction record validated"
        );

        Claim::new(policy, items)
            .map_err(|e| ExtractionError::invalid_field("bill_items", e.to_string()))
    }
}

/// Classifies one raw row into a bill item
fn build_item(
    raw: ExtractedBillItem,
    currency: Currency,
    policy: &PolicyContext,
) -> Result<BillItem, ClaimError> {
    let description = raw
        .description
        .ok_or_else(|| ClaimError::invalid_item("Item description is missing"))?;
    let cost = raw
        .cost
        .ok_or_else(|| ClaimError::invalid_item("Item cost is missing"))?;

    let mut item = classify_item(&description, Money::new(cost, currency), policy)?;

    // The rules had the first word; a service-reported rejection can
    // still narrow the ruling, never widen it.
    if item.is_covered() && raw.is_covered == Some(false) {
        item.mark_rejected(raw.rejection_reason.unwrap_or_default());
    }

    if let Some(quantity) = raw.quantity {
        item = item.with_quantity(quantity)?;
    }
    if let Some(date) = raw.date {
        item = item.with_service_date(date);
    }
    Ok(item)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
