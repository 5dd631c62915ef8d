//! Export Surface
//!
//! Pure formatting over the claims engine's read projections. Nothing
//! here recomputes a number; every figure comes straight out of a
//! [`domain_claims::CalculationResult`]. PDF and UI rendering are
//! external consumers of the same projections.

pub mod csv;

pub use csv::render_claim_csv;
