//! gb-mix: breathing-gas domain types for gasblend.
//!
//! Provides:
//! - `GasComposition` (O2/He percentages, nitrogen implied) with validation
//! - composition blending math (pressure-weighted mixing)
//! - `GasSource` (named composition) and the `GasSelector` tagged variant
//!   resolved once at the call boundary
//!
//! # Architecture
//!
//! Solvers consume plain `GasSource` values and never branch on where a gas
//! came from (preset, bank, custom). Selector resolution and unit handling
//! stay outside the engine.

pub mod composition;
pub mod error;
pub mod source;
pub mod tank;

// Re-exports for ergonomics
pub use composition::GasComposition;
pub use error::{MixError, MixResult};
pub use source::{BankGas, GasSelector, GasSource, Preset};
pub use tank::TankState;
