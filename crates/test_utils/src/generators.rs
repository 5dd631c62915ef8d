//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{Currency, Money};
use domain_claims::BillItem;
use domain_policy::CopayRate;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating non-negative cost amounts in paise
pub fn cost_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..=10_000_000i64
}

/// Strategy for generating non-negative INR Money values
pub fn inr_money_strategy() -> impl Strategy<Value = Money> {
    cost_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::INR))
}

/// Strategy for generating valid copay rates at basis-point granularity
pub fn copay_rate_strategy() -> impl Strategy<Value = CopayRate> {
    (0u32..=10_000u32).prop_map(|basis_points| {
        CopayRate::new(Decimal::new(basis_points as i64, 2)).expect("generated copay in range")
    })
}

/// Strategy for generating valid item descriptions (non-blank after trim)
pub fn description_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,24}"
}

/// Strategy for generating valid bill items in INR
///
/// Roughly half the items come out rejected, with a reason attached.
pub fn bill_item_strategy() -> impl Strategy<Value = BillItem> {
    (description_strategy(), inr_money_strategy(), any::<bool>()).prop_map(
        |(description, cost, covered)| {
            if covered {
                BillItem::covered(description, cost).expect("generated item is valid")
            } else {
                BillItem::rejected(description, cost, "Not covered by policy")
                    .expect("generated item is valid")
            }
        },
    )
}

/// Strategy for generating ordered item sequences, empty included
pub fn bill_items_strategy(max_len: usize) -> impl Strategy<Value = Vec<BillItem>> {
    proptest::collection::vec(bill_item_strategy(), 0..=max_len)
}
