//! gb-core: stable foundation for gasblend.
//!
//! Contains:
//! - numeric (Real + solver tolerance constants + float helpers)
//! - units (uom pressure types + PSI/bar boundary conversion)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{GbError, GbResult};
pub use numeric::*;
pub use units::*;
