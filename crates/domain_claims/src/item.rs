//! Bill line items
//!
//! A `BillItem` is one row of a hospital bill: a description, a cost, and
//! the coverage ruling the engine (or a manual override) assigned to it.
//! Items are validated at construction and their cost is normalized to
//! currency precision, so the totals over a claim are exact sums of what
//! is stored. A rejected item always carries a reason; that pairing is
//! enforced by the `CoverageRuling` type rather than by convention.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_policy::{match_category, Classification, CoverageRuling, CoverageRules, ServiceCategory};

use crate::error::ClaimError;

/// Reason recorded when an item is rejected without an explicit one
pub const MANUAL_REVIEW_REASON: &str = "Requires manual review";

/// A single line item on a hospital bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillItem {
    description: String,
    cost: Money,
    quantity: u32,
    category: ServiceCategory,
    ruling: CoverageRuling,
    service_date: Option<NaiveDate>,
}

impl BillItem {
    /// Creates an item from a classification produced by the coverage rules
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidItemData` when the description is blank
    /// or the cost is negative.
    pub fn classified(
        description: impl Into<String>,
        cost: Money,
        classification: Classification,
    ) -> Result<Self, ClaimError> {
        let (description, cost) = validate_fields(description.into(), cost)?;
        Ok(Self {
            description,
            cost,
            quantity: 1,
            category: classification.category,
            ruling: classification.ruling,
            service_date: None,
        })
    }

    /// Creates a covered item, deriving the category from the description
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidItemData` when the description is blank
    /// or the cost is negative.
    pub fn covered(description: impl Into<String>, cost: Money) -> Result<Self, ClaimError> {
        let description = description.into();
        let category = match_category(&description);
        Self::classified(
            description,
            cost,
            Classification {
                category,
                ruling: CoverageRuling::Covered,
            },
        )
    }

    /// Creates a rejected item, deriving the category from the description
    ///
    /// Blank reasons are replaced with [`MANUAL_REVIEW_REASON`] so a
    /// rejected item never lacks one.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidItemData` when the description is blank
    /// or the cost is negative.
    pub fn rejected(
        description: impl Into<String>,
        cost: Money,
        reason: impl Into<String>,
    ) -> Result<Self, ClaimError> {
        let description = description.into();
        let category = match_category(&description);
        Self::classified(
            description,
            cost,
            Classification {
                category,
                ruling: CoverageRuling::not_covered(normalize_reason(reason.into())),
            },
        )
    }

    /// Sets the billed quantity
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidItemData` when the quantity is zero.
    pub fn with_quantity(mut self, quantity: u32) -> Result<Self, ClaimError> {
        if quantity == 0 {
            return Err(ClaimError::invalid_item("Item quantity must be at least 1"));
        }
        self.quantity = quantity;
        Ok(self)
    }

    /// Sets the date the service was rendered
    pub fn with_service_date(mut self, date: NaiveDate) -> Self {
        self.service_date = Some(date);
        self
    }

    /// Overrides the derived category
    pub fn with_category(mut self, category: ServiceCategory) -> Self {
        self.category = category;
        self
    }

    /// Returns the item description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the total cost of this line, at currency precision
    pub fn cost(&self) -> Money {
        self.cost
    }

    /// Returns the billed quantity
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the cost per unit, at full precision
    pub fn unit_cost(&self) -> Money {
        if self.quantity <= 1 {
            return self.cost;
        }
        self.cost / Decimal::from(self.quantity)
    }

    /// Returns the service category
    pub fn category(&self) -> ServiceCategory {
        self.category
    }

    /// Returns the coverage ruling
    pub fn ruling(&self) -> &CoverageRuling {
        &self.ruling
    }

    /// Returns true when the item counts toward the covered total
    pub fn is_covered(&self) -> bool {
        self.ruling.is_covered()
    }

    /// Returns the rejection reason, if the item is rejected
    pub fn rejection_reason(&self) -> Option<&str> {
        self.ruling.reason()
    }

    /// Returns the service date, if recorded
    pub fn service_date(&self) -> Option<NaiveDate> {
        self.service_date
    }

    /// Overrides the ruling to covered, clearing any rejection reason
    pub fn mark_covered(&mut self) {
        self.ruling = CoverageRuling::Covered;
    }

    /// Overrides the ruling to rejected with the given reason
    ///
    /// Blank reasons are replaced with [`MANUAL_REVIEW_REASON`].
    pub fn mark_rejected(&mut self, reason: impl Into<String>) {
        self.ruling = CoverageRuling::not_covered(normalize_reason(reason.into()));
    }

    /// Re-runs the coverage rules over this item's description
    ///
    /// Both the category and the ruling are replaced with what the rules
    /// now say, discarding manual overrides. Returns true when either
    /// changed.
    pub fn reclassify(&mut self, rules: &CoverageRules) -> bool {
        let classification = rules.evaluate(&self.description);
        let changed =
            classification.category != self.category || classification.ruling != self.ruling;
        self.category = classification.category;
        self.ruling = classification.ruling;
        changed
    }
}

fn validate_fields(description: String, cost: Money) -> Result<(String, Money), ClaimError> {
    let description = description.trim().to_string();
    if description.is_empty() {
        return Err(ClaimError::invalid_item("Item description cannot be blank"));
    }
    if cost.is_negative() {
        return Err(ClaimError::invalid_item(format!(
            "Item cost cannot be negative, got {}",
            cost.amount()
        )));
    }
    Ok((description, cost.round_to_currency()))
}

fn normalize_reason(reason: String) -> String {
    let reason = reason.trim();
    if reason.is_empty() {
        MANUAL_REVIEW_REASON.to_string()
    } else {
        reason.to_string()
    }
}
