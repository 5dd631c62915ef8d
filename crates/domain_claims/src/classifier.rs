//! Item classification
//!
//! Bridges raw bill rows to classified [`BillItem`]s by running the
//! coverage rules derived from the claim's policy. Classification here
//! is authoritative: whatever coverage flags arrived with the raw data,
//! the ruling stored on the item is the one the rules produce.

use core_kernel::Money;
use domain_policy::{Classification, CoverageRules, PolicyContext};

use crate::error::ClaimError;
use crate::item::BillItem;

/// Determines category and ruling for a description under a policy
pub fn classify(description: &str, policy: &PolicyContext) -> Classification {
    CoverageRules::from_policy(policy).evaluate(description)
}

/// Builds a classified bill item from raw description and cost
///
/// # Errors
///
/// Returns `ClaimError::InvalidItemData` when the description is blank
/// or the cost is negative.
pub fn classify_item(
    description: &str,
    cost: Money,
    policy: &PolicyContext,
) -> Result<BillItem, ClaimError> {
    let classification = classify(description, policy);
    BillItem::classified(description, cost, classification)
}
