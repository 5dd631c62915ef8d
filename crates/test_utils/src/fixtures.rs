//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the claims
//! engine. These fixtures are designed to be consistent and predictable
//! for unit tests.

use chrono::NaiveDate;
use core_kernel::{ClaimId, Currency, DocumentId, Money};
use domain_claims::BillItem;
use domain_policy::{ClientDetails, CopayRate, PolicyContext};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Creates an INR amount
    pub fn inr(amount: Decimal) -> Money {
        Money::new(amount, Currency::INR)
    }

    /// Standard medication cost
    pub fn inr_100() -> Money {
        Money::new(dec!(100.00), Currency::INR)
    }

    /// Standard rejected-item cost
    pub fn inr_50() -> Money {
        Money::new(dec!(50.00), Currency::INR)
    }

    /// Creates a zero INR amount
    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// A USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for policy context test data
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// A standard 20% copay plan with client details
    pub fn gold_plan() -> PolicyContext {
        PolicyContext::new("Gold Health Plan", Self::copay(dec!(20)))
            .unwrap()
            .with_client_details(ClientDetails {
                name: Some("R. Iyer".into()),
                policy_number: Some("GHP-2209".into()),
                address: Some("14 Lake Road, Pune".into()),
            })
    }

    /// A plan with no copay
    pub fn zero_copay_plan() -> PolicyContext {
        PolicyContext::new("Full Cover Plan", CopayRate::zero()).unwrap()
    }

    /// A plan where the patient pays everything
    pub fn full_copay_plan() -> PolicyContext {
        PolicyContext::new("Catastrophe-Only Plan", Self::copay(dec!(100))).unwrap()
    }

    /// A plan that excludes physiotherapy and dental care
    pub fn plan_with_exclusions() -> PolicyContext {
        PolicyContext::new("Gold Health Plan", Self::copay(dec!(20)))
            .unwrap()
            .with_exclusions(vec!["physiotherapy".into(), "dental".into()])
    }

    /// Creates a validated copay rate
    pub fn copay(percentage: Decimal) -> CopayRate {
        CopayRate::new(percentage).expect("fixture copay must be in range")
    }
}

/// Fixture for bill item test data
pub struct ItemFixtures;

impl ItemFixtures {
    /// A covered medication line
    pub fn paracetamol() -> BillItem {
        BillItem::covered("Paracetamol 500mg", MoneyFixtures::inr_100()).unwrap()
    }

    /// A rejected personal-care line
    pub fn soap() -> BillItem {
        BillItem::rejected(
            "Soap",
            MoneyFixtures::inr_50(),
            "Personal care item - not medical necessity",
        )
        .unwrap()
    }

    /// A covered diagnostic line
    pub fn blood_test() -> BillItem {
        BillItem::covered("Blood test", MoneyFixtures::inr(dec!(250.00))).unwrap()
    }

    /// A rejected entertainment line
    pub fn tv_charges() -> BillItem {
        BillItem::rejected(
            "Television charges",
            MoneyFixtures::inr(dec!(200.00)),
            "Comfort/entertainment item - not covered by policy",
        )
        .unwrap()
    }

    /// The standard two-item bill used in worked examples
    pub fn worked_example() -> Vec<BillItem> {
        vec![Self::paracetamol(), Self::soap()]
    }

    /// Standard service date
    pub fn service_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic claim ID for testing
    pub fn claim_id() -> ClaimId {
        ClaimId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic document ID for testing
    pub fn document_id() -> DocumentId {
        DocumentId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }
}
