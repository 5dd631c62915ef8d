//! Claims Calculation Domain
//!
//! This crate implements the claim review session: classification of bill
//! items under a policy's coverage rules, exact decimal totals with copay
//! application, and the override operations a reviewer applies before
//! sign-off.
//!
//! # Calculation Flow
//!
//! ```text
//! bill rows -> classify -> aggregate -> review overrides -> report
//! ```

pub mod calculation;
pub mod claim;
pub mod classifier;
pub mod error;
pub mod events;
pub mod item;
pub mod report;

pub use calculation::{aggregate, CalculationResult};
pub use claim::Claim;
pub use classifier::{classify, classify_item};
pub use error::ClaimError;
pub use events::ClaimEvent;
pub use item::{BillItem, MANUAL_REVIEW_REASON};
pub use report::{CategoryLine, CoverageSummary, ReportRow, SummaryMetrics};
