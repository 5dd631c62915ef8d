//! Claim aggregate
//!
//! The Claim is the consistency boundary for a review session: a policy
//! context, the classified bill items, and the currency they are
//! denominated in. Every revision below validates its input before any
//! state changes, then hands back a freshly computed
//! [`CalculationResult`], so a caller can never observe totals that
//! disagree with the items they were computed from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Currency, DocumentId};
use domain_policy::{ClientDetails, CopayRate, CoverageRules, PolicyContext};

use crate::calculation::{aggregate, CalculationResult};
use crate::error::ClaimError;
use crate::events::ClaimEvent;
use crate::item::{BillItem, MANUAL_REVIEW_REASON};

/// A medical reimbursement claim under review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    id: ClaimId,
    /// Policy facts the claim is calculated against
    policy: PolicyContext,
    /// Bill items in the order they appear on the bill
    items: Vec<BillItem>,
    /// Currency every item must be denominated in
    currency: Currency,
    /// Document the claim was extracted from, if any
    source_document: Option<DocumentId>,
    /// Domain events to be published
    #[serde(skip)]
    events: Vec<ClaimEvent>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Claim {
    /// Creates a claim over classified bill items
    ///
    /// The claim currency is pinned to the first item's currency (rupees
    /// for an empty claim) and every item must match it.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidItemData` when items mix currencies.
    pub fn new(policy: PolicyContext, items: Vec<BillItem>) -> Result<Self, ClaimError> {
        let currency = items
            .first()
            .map(|item| item.cost().currency())
            .unwrap_or_default();

        for (index, item) in items.iter().enumerate() {
            if item.cost().currency() != currency {
                return Err(ClaimError::invalid_item(format!(
                    "Item {index} is denominated in {} but the claim is in {currency}",
                    item.cost().currency()
                )));
            }
        }

        let now = Utc::now();
        let id = ClaimId::new();

        Ok(Self {
            id,
            policy,
            currency,
            source_document: None,
            events: vec![ClaimEvent::ClaimOpened {
                claim_id: id,
                item_count: items.len(),
                timestamp: now,
            }],
            items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Records the document this claim was extracted from
    pub fn with_source_document(mut self, document_id: DocumentId) -> Self {
        self.source_document = Some(document_id);
        self
    }

    /// Returns the claim ID
    pub fn id(&self) -> ClaimId {
        self.id
    }

    /// Returns the policy context
    pub fn policy(&self) -> &PolicyContext {
        &self.policy
    }

    /// Returns the bill items in bill order
    pub fn items(&self) -> &[BillItem] {
        &self.items
    }

    /// Returns the number of bill items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the claim has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the claim currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the source document, if the claim was extracted from one
    pub fn source_document(&self) -> Option<DocumentId> {
        self.source_document
    }

    /// Returns the creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<ClaimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Computes the current totals without changing the claim
    pub fn recalculate(&self) -> CalculationResult {
        aggregate(&self.items, self.policy.copay(), self.currency)
    }

    /// Appends an item to the bill
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidItemData` when the item's currency
    /// does not match the claim's.
    pub fn add_item(&mut self, item: BillItem) -> Result<CalculationResult, ClaimError> {
        self.ensure_claim_currency(&item)?;

        let now = Utc::now();
        self.events.push(ClaimEvent::ItemAdded {
            claim_id: self.id,
            index: self.items.len(),
            description: item.description().to_string(),
            cost: item.cost().amount(),
            timestamp: now,
        });
        self.items.push(item);
        self.updated_at = now;

        Ok(self.recalculate())
    }

    /// Removes the item at `index`
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::IndexOutOfRange` when no item exists at
    /// `index`; the claim is left unchanged.
    pub fn remove_item(&mut self, index: usize) -> Result<CalculationResult, ClaimError> {
        if index >= self.items.len() {
            return Err(ClaimError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let removed = self.items.remove(index);
        let now = Utc::now();
        self.events.push(ClaimEvent::ItemRemoved {
            claim_id: self.id,
            index,
            description: removed.description().to_string(),
            timestamp: now,
        });
        self.updated_at = now;

        Ok(self.recalculate())
    }

    /// Replaces the item at `index` with a new one
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::IndexOutOfRange` when no item exists at
    /// `index` and `ClaimError::InvalidItemData` on a currency mismatch;
    /// the claim is left unchanged in both cases.
    pub fn replace_item(
        &mut self,
        index: usize,
        item: BillItem,
    ) -> Result<CalculationResult, ClaimError> {
        if index >= self.items.len() {
            return Err(ClaimError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.ensure_claim_currency(&item)?;

        let now = Utc::now();
        self.events.push(ClaimEvent::ItemReplaced {
            claim_id: self.id,
            index,
            description: item.description().to_string(),
            timestamp: now,
        });
        self.items[index] = item;
        self.updated_at = now;

        Ok(self.recalculate())
    }

    /// Sets the copay percentage
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidPolicyData` when the percentage is
    /// outside the 0 to 100 range; the claim is left unchanged.
    pub fn set_copay(&mut self, percentage: Decimal) -> Result<CalculationResult, ClaimError> {
        let copay = CopayRate::new(percentage)?;
        let previous = self.policy.copay().percentage();

        self.policy.set_copay(copay);
        let now = Utc::now();
        self.events.push(ClaimEvent::CopayChanged {
            claim_id: self.id,
            previous,
            current: copay.percentage(),
            timestamp: now,
        });
        self.updated_at = now;

        Ok(self.recalculate())
    }

    /// Corrects the policy name
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidPolicyData` when the new name is
    /// blank; the claim is left unchanged.
    pub fn rename_policy(
        &mut self,
        name: impl Into<String>,
    ) -> Result<CalculationResult, ClaimError> {
        let previous = self.policy.policy_name().to_string();
        self.policy.rename(name)?;

        let now = Utc::now();
        self.events.push(ClaimEvent::PolicyRenamed {
            claim_id: self.id,
            previous,
            current: self.policy.policy_name().to_string(),
            timestamp: now,
        });
        self.updated_at = now;

        Ok(self.recalculate())
    }

    /// Replaces the client details as a whole value
    pub fn set_client_details(&mut self, client: ClientDetails) -> CalculationResult {
        self.policy.set_client_details(client);

        let now = Utc::now();
        self.events.push(ClaimEvent::ClientDetailsUpdated {
            claim_id: self.id,
            timestamp: now,
        });
        self.updated_at = now;

        self.recalculate()
    }

    /// Overrides every item to covered
    pub fn mark_all_covered(&mut self) -> CalculationResult {
        for item in &mut self.items {
            item.mark_covered();
        }

        let now = Utc::now();
        self.events.push(ClaimEvent::AllItemsCovered {
            claim_id: self.id,
            item_count: self.items.len(),
            timestamp: now,
        });
        self.updated_at = now;

        self.recalculate()
    }

    /// Overrides every item to rejected
    ///
    /// A missing or blank reason falls back to [`MANUAL_REVIEW_REASON`].
    pub fn mark_all_rejected(&mut self, reason: Option<&str>) -> CalculationResult {
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(MANUAL_REVIEW_REASON);

        for item in &mut self.items {
            item.mark_rejected(reason);
        }

        let now = Utc::now();
        self.events.push(ClaimEvent::AllItemsRejected {
            claim_id: self.id,
            item_count: self.items.len(),
            reason: reason.to_string(),
            timestamp: now,
        });
        self.updated_at = now;

        self.recalculate()
    }

    /// Re-runs the coverage rules over every item
    ///
    /// Manual overrides are discarded in favour of what the rules say
    /// now. Useful after the policy's coverage terms have been edited.
    pub fn reclassify(&mut self) -> CalculationResult {
        let rules = CoverageRules::from_policy(&self.policy);
        let mut changed = 0;
        for item in &mut self.items {
            if item.reclassify(&rules) {
                changed += 1;
            }
        }

        let now = Utc::now();
        self.events.push(ClaimEvent::ItemsReclassified {
            claim_id: self.id,
            changed,
            timestamp: now,
        });
        self.updated_at = now;

        self.recalculate()
    }

    fn ensure_claim_currency(&self, item: &BillItem) -> Result<(), ClaimError> {
        let item_currency = item.cost().currency();
        if item_currency != self.currency {
            return Err(ClaimError::invalid_item(format!(
                "Item is denominated in {item_currency} but the claim is in {}",
                self.currency
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Money;
    use rust_decimal_macros::dec;

    fn rupees(amount: Decimal) -> Money {
        Money::new(amount, Currency::INR)
    }

    fn test_policy() -> PolicyContext {
        PolicyContext::new("Gold Health Plan", CopayRate::new(dec!(20)).unwrap()).unwrap()
    }

    fn test_claim() -> Claim {
        Claim::new(
            test_policy(),
            vec![
                BillItem::covered("Paracetamol 500mg", rupees(dec!(100))).unwrap(),
                BillItem::rejected("Soap", rupees(dec!(50)), "Personal care item").unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_claim_pins_currency_from_first_item() {
        let claim = test_claim();
        assert_eq!(claim.currency(), Currency::INR);

        let empty = Claim::new(test_policy(), vec![]).unwrap();
        assert_eq!(empty.currency(), Currency::INR);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_mixed_currencies_rejected_at_creation() {
        let result = Claim::new(
            test_policy(),
            vec![
                BillItem::covered("Blood test", rupees(dec!(100))).unwrap(),
                BillItem::covered("Blood test", Money::new(dec!(5), Currency::USD)).unwrap(),
            ],
        );

        assert!(matches!(result, Err(ClaimError::InvalidItemData { .. })));
    }

    #[test]
    fn test_add_item_recalculates() {
        let mut claim = test_claim();
        let result = claim
            .add_item(BillItem::covered("X-ray chest", rupees(dec!(300))).unwrap())
            .unwrap();

        assert_eq!(claim.item_count(), 3);
        assert_eq!(result.total_billed().amount(), dec!(450));
        assert_eq!(result.total_covered().amount(), dec!(400));
    }

    #[test]
    fn test_add_item_rejects_foreign_currency() {
        let mut claim = test_claim();
        let foreign = BillItem::covered("Blood test", Money::new(dec!(5), Currency::USD)).unwrap();

        assert!(claim.add_item(foreign).is_err());
        assert_eq!(claim.item_count(), 2);
    }

    #[test]
    fn test_remove_item_out_of_range_leaves_claim_unchanged() {
        let mut claim = test_claim();
        let before = claim.recalculate();

        let result = claim.remove_item(2);
        assert_eq!(result, Err(ClaimError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(claim.recalculate(), before);
    }

    #[test]
    fn test_remove_item_recalculates() {
        let mut claim = test_claim();
        let result = claim.remove_item(1).unwrap();

        assert_eq!(claim.item_count(), 1);
        assert_eq!(result.total_billed().amount(), dec!(100));
        assert_eq!(result.total_rejected().amount(), dec!(0));
    }

    #[test]
    fn test_replace_item_swaps_in_place() {
        let mut claim = test_claim();
        let replacement = BillItem::covered("Ibuprofen 400mg", rupees(dec!(80))).unwrap();

        let result = claim.replace_item(1, replacement).unwrap();
        assert_eq!(claim.items()[1].description(), "Ibuprofen 400mg");
        assert_eq!(result.total_covered().amount(), dec!(180));
    }

    #[test]
    fn test_set_copay_out_of_range_leaves_claim_unchanged() {
        let mut claim = test_claim();
        let before = claim.recalculate();

        let result = claim.set_copay(dec!(150));
        assert!(matches!(result, Err(ClaimError::InvalidPolicyData(_))));
        assert_eq!(claim.policy().copay().percentage(), dec!(20));
        assert_eq!(claim.recalculate(), before);
    }

    #[test]
    fn test_set_copay_recalculates() {
        let mut claim = test_claim();
        let result = claim.set_copay(dec!(50)).unwrap();

        assert_eq!(result.approved_amount().amount(), dec!(50.00));
        assert_eq!(result.patient_responsibility().amount(), dec!(100.00));
    }

    #[test]
    fn test_rename_policy_validates_before_mutating() {
        let mut claim = test_claim();

        assert!(claim.rename_policy("   ").is_err());
        assert_eq!(claim.policy().policy_name(), "Gold Health Plan");

        claim.rename_policy("Silver Health Plan").unwrap();
        assert_eq!(claim.policy().policy_name(), "Silver Health Plan");
    }

    #[test]
    fn test_mark_all_covered() {
        let mut claim = test_claim();
        let result = claim.mark_all_covered();

        assert!(claim.items().iter().all(BillItem::is_covered));
        assert_eq!(result.total_covered(), result.total_billed());
        assert_eq!(result.approved_amount().amount(), dec!(120.00));
    }

    #[test]
    fn test_mark_all_rejected_defaults_the_reason() {
        let mut claim = test_claim();
        let result = claim.mark_all_rejected(None);

        assert!(claim.items().iter().all(|i| !i.is_covered()));
        assert!(claim
            .items()
            .iter()
            .all(|i| i.rejection_reason() == Some(MANUAL_REVIEW_REASON)));
        assert!(result.approved_amount().is_zero());
    }

    #[test]
    fn test_reclassify_applies_current_policy_terms() {
        let mut claim = test_claim();
        claim.mark_all_covered();

        let result = claim.reclassify();

        // The soap goes back to rejected; the medication stays covered.
        assert!(claim.items()[0].is_covered());
        assert!(!claim.items()[1].is_covered());
        assert_eq!(result.total_covered().amount(), dec!(100));
    }

    #[test]
    fn test_events_accumulate_and_drain() {
        let mut claim = test_claim();
        claim.set_copay(dec!(10)).unwrap();
        claim.remove_item(0).unwrap();

        let events = claim.take_events();
        let types: Vec<&str> = events.iter().map(ClaimEvent::event_type).collect();
        assert_eq!(types, ["ClaimOpened", "CopayChanged", "ItemRemoved"]);
        assert!(events.iter().all(|e| e.claim_id() == claim.id()));

        assert!(claim.take_events().is_empty());
    }

    #[test]
    fn test_failed_operations_emit_no_events() {
        let mut claim = test_claim();
        claim.take_events();

        let _ = claim.remove_item(99);
        let _ = claim.set_copay(dec!(-5));

        assert!(claim.take_events().is_empty());
    }

    #[test]
    fn test_source_document_is_recorded() {
        let document_id = DocumentId::new();
        let claim = test_claim().with_source_document(document_id);
        assert_eq!(claim.source_document(), Some(document_id));
    }
}
