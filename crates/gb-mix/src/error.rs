//! Gas mix errors.

use thiserror::Error;

/// Result type for mix operations.
pub type MixResult<T> = Result<T, MixError>;

/// Errors that can occur while constructing or combining gas mixes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MixError {
    /// Composition fails physical validity (negative, >100%, sum >100%).
    #[error("Invalid mix: {what}")]
    InvalidMix { what: &'static str },

    /// A gas-bank reference did not resolve.
    #[error("Unknown gas bank: {id}")]
    UnknownBank { id: String },

    /// Blending weights that cannot form a mixture.
    #[error("Invalid blend: {what}")]
    InvalidBlend { what: &'static str },
}
