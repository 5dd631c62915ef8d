//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant
//! fields while using defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use domain_claims::{BillItem, Claim};
use domain_policy::{CopayRate, PolicyContext};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::PolicyFixtures;

/// Builder for constructing test bill items
pub struct TestBillItemBuilder {
    description: String,
    cost: Decimal,
    currency: Currency,
    rejection_reason: Option<String>,
    quantity: u32,
    service_date: Option<NaiveDate>,
}

impl Default for TestBillItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBillItemBuilder {
    /// Creates a new builder for a covered 100-rupee item
    pub fn new() -> Self {
        Self {
            description: "Paracetamol 500mg".to_string(),
            cost: dec!(100.00),
            currency: Currency::INR,
            rejection_reason: None,
            quantity: 1,
            service_date: None,
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the cost amount
    pub fn with_cost(mut self, cost: Decimal) -> Self {
        self.cost = cost;
        self
    }

    /// Sets the currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Makes the item rejected with the given reason
    pub fn rejected(mut self, reason: impl Into<String>) -> Self {
        self.rejection_reason = Some(reason.into());
        self
    }

    /// Sets the billed quantity
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the service date
    pub fn with_service_date(mut self, date: NaiveDate) -> Self {
        self.service_date = Some(date);
        self
    }

    /// Builds the bill item
    ///
    /// # Panics
    ///
    /// Panics when the configured fields violate item invariants; test
    /// data is expected to be valid.
    pub fn build(self) -> BillItem {
        let cost = Money::new(self.cost, self.currency);
        let item = match self.rejection_reason {
            Some(reason) => BillItem::rejected(self.description, cost, reason),
            None => BillItem::covered(self.description, cost),
        };
        let mut item = item
            .and_then(|i| i.with_quantity(self.quantity))
            .expect("test bill item must be valid");
        if let Some(date) = self.service_date {
            item = item.with_service_date(date);
        }
        item
    }
}

/// Builder for constructing test claims
pub struct TestClaimBuilder {
    policy: PolicyContext,
    items: Vec<BillItem>,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a new builder over the gold plan with no items
    pub fn new() -> Self {
        Self {
            policy: PolicyFixtures::gold_plan(),
            items: Vec::new(),
        }
    }

    /// Sets the policy context
    pub fn with_policy(mut self, policy: PolicyContext) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the copay percentage, keeping the rest of the policy
    pub fn with_copay(mut self, percentage: Decimal) -> Self {
        self.policy
            .set_copay(CopayRate::new(percentage).expect("test copay must be in range"));
        self
    }

    /// Appends a pre-built item
    pub fn with_item(mut self, item: BillItem) -> Self {
        self.items.push(item);
        self
    }

    /// Appends a covered item
    pub fn add_covered(mut self, description: impl Into<String>, cost: Decimal) -> Self {
        self.items.push(
            TestBillItemBuilder::new()
                .with_description(description)
                .with_cost(cost)
                .build(),
        );
        self
    }

    /// Appends a rejected item
    pub fn add_rejected(
        mut self,
        description: impl Into<String>,
        cost: Decimal,
        reason: impl Into<String>,
    ) -> Self {
        self.items.push(
            TestBillItemBuilder::new()
                .with_description(description)
                .with_cost(cost)
                .rejected(reason)
                .build(),
        );
        self
    }

    /// Builds the claim
    ///
    /// # Panics
    ///
    /// Panics when the configured items mix currencies; test data is
    /// expected to be valid.
    pub fn build(self) -> Claim {
        Claim::new(self.policy, self.items).expect("test claim must be valid")
    }
}
