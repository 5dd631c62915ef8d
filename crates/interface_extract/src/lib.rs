//! Extraction Boundary
//!
//! Everything between the external AI extraction service and the claims
//! engine lives here:
//!
//! - `record`: serde DTOs for the upstream JSON record, plus cleanup of
//!   payloads that arrive fenced in Markdown or wrapped in prose
//! - `validate`: whole-record validation turning a record into a `Claim`
//! - `document`: intake checks for uploaded policy/bill documents before
//!   they are sent to the extraction service
//! - `config`: runtime configuration for the extraction-service call
//!
//! The engine core never sees raw extraction output; it only receives
//! claims that passed this boundary.

pub mod config;
pub mod document;
pub mod error;
pub mod record;
pub mod validate;

pub use config::ExtractionConfig;
pub use document::{DocumentError, DocumentKind};
pub use error::ExtractionError;
pub use record::{ExtractedBillItem, ExtractedClaimRecord};
