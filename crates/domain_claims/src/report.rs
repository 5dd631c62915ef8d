//! Report views over a calculation result
//!
//! These are read models: flat, serializable projections of a
//! [`CalculationResult`] for display, export, and review. None of them
//! hold state of their own; each is recomputed from the result it is
//! asked about.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_policy::ServiceCategory;

use crate::calculation::CalculationResult;

/// The headline figures of a calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_billed: Money,
    pub total_covered: Money,
    pub total_rejected: Money,
    pub approved_amount: Money,
    pub patient_responsibility: Money,
    pub copay_percentage: Decimal,
}

/// One display row per bill item, in bill order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub description: String,
    pub category: ServiceCategory,
    pub quantity: u32,
    pub cost: Money,
    pub covered: bool,
    pub rejection_reason: Option<String>,
}

/// Counts of covered and rejected items plus a reason histogram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub total_items: usize,
    pub covered_items: usize,
    pub rejected_items: usize,
    /// Share of items covered, as a percentage rounded half-up to one
    /// decimal place; zero for an empty claim
    pub coverage_rate: Decimal,
    /// Rejection reason frequencies, sorted by reason
    pub rejection_reasons: BTreeMap<String, usize>,
}

/// Per-category totals for the categories present on the bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLine {
    pub category: ServiceCategory,
    pub item_count: usize,
    pub billed: Money,
    pub covered: Money,
    pub rejected: Money,
}

impl CalculationResult {
    /// Returns the headline figures of this calculation
    pub fn summary_metrics(&self) -> SummaryMetrics {
        SummaryMetrics {
            total_billed: self.total_billed(),
            total_covered: self.total_covered(),
            total_rejected: self.total_rejected(),
            approved_amount: self.approved_amount(),
            patient_responsibility: self.patient_responsibility(),
            copay_percentage: self.copay().percentage(),
        }
    }

    /// Returns one row per item, preserving bill order
    pub fn to_rows(&self) -> Vec<ReportRow> {
        self.items()
            .iter()
            .map(|item| ReportRow {
                description: item.description().to_string(),
                category: item.category(),
                quantity: item.quantity(),
                cost: item.cost(),
                covered: item.is_covered(),
                rejection_reason: item.rejection_reason().map(str::to_string),
            })
            .collect()
    }

    /// Returns item counts and the rejection reason histogram
    pub fn coverage_summary(&self) -> CoverageSummary {
        let total_items = self.items().len();
        let covered_items = self.items().iter().filter(|i| i.is_covered()).count();
        let rejected_items = total_items - covered_items;

        let coverage_rate = if total_items == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(covered_items) * dec!(100) / Decimal::from(total_items))
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        };

        let mut rejection_reasons: BTreeMap<String, usize> = BTreeMap::new();
        for item in self.items() {
            if let Some(reason) = item.rejection_reason() {
                *rejection_reasons.entry(reason.to_string()).or_insert(0) += 1;
            }
        }

        CoverageSummary {
            total_items,
            covered_items,
            rejected_items,
            coverage_rate,
            rejection_reasons,
        }
    }

    /// Returns per-category totals for the categories present on the bill
    ///
    /// Lines follow the fixed category ordering; categories with no items
    /// are omitted.
    pub fn category_breakdown(&self) -> Vec<CategoryLine> {
        let zero = Money::zero(self.currency());

        ServiceCategory::ALL
            .iter()
            .filter_map(|&category| {
                let mut line = CategoryLine {
                    category,
                    item_count: 0,
                    billed: zero,
                    covered: zero,
                    rejected: zero,
                };

                for item in self.items().iter().filter(|i| i.category() == category) {
                    line.item_count += 1;
                    line.billed = line.billed + item.cost();
                    if item.is_covered() {
                        line.covered = line.covered + item.cost();
                    } else {
                        line.rejected = line.rejected + item.cost();
                    }
                }

                (line.item_count > 0).then_some(line)
            })
            .collect()
    }
}
