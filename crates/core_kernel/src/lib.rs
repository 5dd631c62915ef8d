//! Core Kernel - Foundational types for the claims engine
//!
//! This crate provides the building blocks shared by every domain module:
//! - Money types with precise decimal arithmetic and half-up rounding
//! - Strongly-typed identifiers
//! - The kernel error type

pub mod error;
pub mod identifiers;
pub mod money;

pub use error::CoreError;
pub use identifiers::{ClaimId, DocumentId};
pub use money::{Currency, Money, MoneyError};
