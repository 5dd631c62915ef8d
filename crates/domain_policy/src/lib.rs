//! Policy Domain
//!
//! This crate carries the policy-side facts and rules a medical claim is
//! calculated against:
//!
//! - **Value objects**: `PolicyContext`, `ClientDetails`, `CopayRate`
//! - **Coverage rules**: the `ServiceCategory` enumeration, the keyword
//!   matcher, and `CoverageRules` (built-in tables plus policy-specific
//!   covered services and exclusions)
//!
//! The crate is pure domain logic: no I/O, no shared state. A
//! `PolicyContext` is built once per claim session (normally by the
//! extraction boundary) and owned by the claim aggregate.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{CopayRate, CoverageRules, PolicyContext};
//!
//! let context = PolicyContext::new("Gold Health Plan", CopayRate::new(dec!(20))?)?
//!     .with_exclusions(vec!["physiotherapy".into()]);
//!
//! let rules = CoverageRules::from_policy(&context);
//! let decision = rules.evaluate("Soap");
//! assert!(!decision.ruling.is_covered());
//! ```

pub mod context;
pub mod copay;
pub mod error;
pub mod rules;

pub use context::{ClientDetails, PolicyContext};
pub use copay::CopayRate;
pub use error::PolicyError;
pub use rules::{match_category, Classification, CoverageRules, CoverageRuling, ServiceCategory};
