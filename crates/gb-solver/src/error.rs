//! Error types for blend solving.

use gb_mix::MixError;
use thiserror::Error;

/// Errors that can occur while solving a blend.
///
/// Expected infeasibility is always a variant here, returned by value;
/// nothing in the solver panics on bad gas arithmetic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlendError {
    #[error("Target pressure must be positive")]
    TargetPressureInvalid,

    #[error("Invalid start pressure: {what}")]
    StartPressureInvalid { what: &'static str },

    /// Target asks for less nitrogen than zero.
    #[error("Target mix is impossible: {what}")]
    ImpossibleTarget { what: &'static str },

    /// The cylinder holds more of some component than the target allows;
    /// venting first would make the request feasible.
    #[error("Cylinder must be bled down first: {what}")]
    BleedRequired { what: &'static str },

    /// The top-off gas cannot supply the nitrogen balance the target needs.
    #[error("Top-off gas cannot reach the target: {what}")]
    UnreachableWithTopGas { what: &'static str },

    /// A solved plan missed the target pressure by more than the accepted
    /// tolerance. Indicates a solver edge case, not user error.
    #[error("Blend landed outside tolerance: {what}")]
    ToleranceExceeded { what: String },

    /// The bleed-down search exhausted its iteration budget.
    #[error("No bleed-down solution found: {last_error}")]
    BleedSolutionNotFound { last_error: String },

    /// Reverse solvers: no start pressure / target He% avoids buying helium.
    #[error("No helium-free solution: {what}")]
    NoHeliumFreeSolution { what: &'static str },

    #[error("No gas sources available")]
    NoGasSources,

    /// The addition the target requires is not a physical gas mixture.
    #[error("Needed addition is not a physical gas: {what}")]
    InvalidTargetComposition { what: &'static str },

    /// Nothing worked: every gas combination failed and the bleed search
    /// (if applicable) also came up empty.
    #[error("No valid blend found with the available gases")]
    NoValidBlendFound,

    #[error("Mix error: {0}")]
    Mix(#[from] MixError),
}

pub type BlendResult<T> = Result<T, BlendError>;
