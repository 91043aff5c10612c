//! gp-core: stable foundation for gasprops.
//!
//! Contains:
//! - units (uom SI types, constructors, correlation unit conversions)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::CoreError;
pub use numeric::*;
pub use units::*;
