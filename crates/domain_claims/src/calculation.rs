//! Claim totals and copay application
//!
//! All arithmetic here is exact decimal arithmetic. Item costs enter at
//! currency precision, every total is a plain sum of them, and rounding
//! happens exactly once: on the approved amount, half-up at currency
//! precision. The patient responsibility is then derived by subtraction,
//! so the two payable figures always add back to the billed total and
//! any sub-minor-unit remainder from the copay split lands on the
//! patient side.

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};
use domain_policy::CopayRate;

use crate::item::BillItem;

/// The computed financial outcome of a claim
///
/// A result is a self-contained snapshot: it owns the items it was
/// computed over, so override operations can hand back a value that
/// stays coherent while the claim keeps changing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    items: Vec<BillItem>,
    copay: CopayRate,
    currency: Currency,
    total_billed: Money,
    total_covered: Money,
    total_rejected: Money,
    approved_amount: Money,
    patient_responsibility: Money,
}

impl CalculationResult {
    /// Returns the items this result was computed over, in bill order
    pub fn items(&self) -> &[BillItem] {
        &self.items
    }

    /// Returns the copay rate that was applied
    pub fn copay(&self) -> CopayRate {
        self.copay
    }

    /// Returns the claim currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the sum of all item costs
    pub fn total_billed(&self) -> Money {
        self.total_billed
    }

    /// Returns the sum of covered item costs
    pub fn total_covered(&self) -> Money {
        self.total_covered
    }

    /// Returns the sum of rejected item costs
    pub fn total_rejected(&self) -> Money {
        self.total_rejected
    }

    /// Returns the amount the insurer pays
    pub fn approved_amount(&self) -> Money {
        self.approved_amount
    }

    /// Returns the amount the patient pays
    pub fn patient_responsibility(&self) -> Money {
        self.patient_responsibility
    }

    /// Returns the number of items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Computes claim totals over a snapshot of bill items.
///
/// Every item lands in exactly one of the covered or rejected buckets,
/// so `total_billed == total_covered + total_rejected` holds by
/// construction. The approved amount is the insurer share of the covered
/// total, rounded half-up at currency precision; the patient pays the
/// rest of the billed total.
///
/// All items must be denominated in `currency`. The claim aggregate
/// enforces this before items are admitted.
pub fn aggregate(items: &[BillItem], copay: CopayRate, currency: Currency) -> CalculationResult {
    let zero = Money::zero(currency);
    let (total_covered, total_rejected) =
        items
            .iter()
            .fold((zero, zero), |(covered, rejected), item| {
                if item.is_covered() {
                    (covered + item.cost(), rejected)
                } else {
                    (covered, rejected + item.cost())
                }
            });

    let total_billed = total_covered + total_rejected;
    let approved_amount = copay.insurer_share(&total_covered).round_to_currency();
    let patient_responsibility = total_billed - approved_amount;

    tracing::debug!(
        item_count = items.len(),
        %total_billed,
        %approved_amount,
        %patient_responsibility,
        "claim totals computed"
    );

    CalculationResult {
        items: items.to_vec(),
        copay,
        currency,
        total_billed,
        total_covered,
        total_rejected,
        approved_amount,
        patient_responsibility,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    prop_compose! {
        fn arb_items()(
            specs in prop::collection::vec((any::<bool>(), 0i64..=10_000_000), 0..24)
        ) -> Vec<BillItem> {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (covered, minor))| {
                    let cost = Money::from_minor(minor, Currency::INR);
                    let description = format!("Line item {i}");
                    if covered {
                        BillItem::covered(description, cost).unwrap()
                    } else {
                        BillItem::rejected(description, cost, "Not covered by policy").unwrap()
                    }
                })
                .collect()
        }
    }

    prop_compose! {
        fn arb_copay()(basis_points in 0u32..=10_000) -> CopayRate {
            CopayRate::new(Decimal::new(basis_points as i64, 2)).unwrap()
        }
    }

    proptest! {
        #[test]
        fn billed_splits_exactly_into_covered_and_rejected(
            items in arb_items(),
            copay in arb_copay()
        ) {
            let result = aggregate(&items, copay, Currency::INR);
            prop_assert_eq!(
                result.total_covered() + result.total_rejected(),
                result.total_billed()
            );
        }

        #[test]
        fn payable_amounts_add_back_to_billed(
            items in arb_items(),
            copay in arb_copay()
        ) {
            let result = aggregate(&items, copay, Currency::INR);
            prop_assert_eq!(
                result.approved_amount() + result.patient_responsibility(),
                result.total_billed()
            );
        }

        #[test]
        fn approved_never_exceeds_covered(
            items in arb_items(),
            copay in arb_copay()
        ) {
            let result = aggregate(&items, copay, Currency::INR);
            prop_assert!(result.approved_amount().amount() >= dec!(0));
            prop_assert!(result.approved_amount().amount() <= result.total_covered().amount());
        }

        #[test]
        fn raising_the_copay_never_raises_the_approved_amount(
            items in arb_items(),
            low in 0u32..=5_000,
            delta in 0u32..=5_000
        ) {
            let lower = CopayRate::new(Decimal::new(low as i64, 2)).unwrap();
            let higher = CopayRate::new(Decimal::new((low + delta) as i64, 2)).unwrap();

            let at_lower = aggregate(&items, lower, Currency::INR);
            let at_higher = aggregate(&items, higher, Currency::INR);

            prop_assert!(
                at_higher.approved_amount().amount() <= at_lower.approved_amount().amount()
            );
        }

        #[test]
        fn aggregation_is_deterministic(items in arb_items(), copay in arb_copay()) {
            prop_assert_eq!(
                aggregate(&items, copay, Currency::INR),
                aggregate(&items, copay, Currency::INR)
            );
        }
    }
}
