//! at-core: stable foundation for aerotherm.
//!
//! Contains:
//! - units (uom SI types + constructors + physical constants)
//! - numeric (Real, finiteness checks, table interpolation)
//! - error (shared error type and the pipeline stage tag)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{AtError, AtResult, Stage};
pub use numeric::*;
pub use units::*;
