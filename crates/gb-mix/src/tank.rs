//! Cylinder state: pressure plus contents.

use crate::composition::GasComposition;
use gb_core::numeric::Real;

/// A cylinder's condition: pressure (canonical PSI) and gas composition.
///
/// Used for both the starting tank and the requested target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankState {
    pub pressure: Real,
    pub mix: GasComposition,
}

impl TankState {
    pub fn new(pressure: Real, mix: GasComposition) -> Self {
        Self { pressure, mix }
    }

    /// An empty cylinder. The mix is what the residual gas would be; with
    /// zero pressure it contributes nothing to a blend.
    pub fn empty() -> Self {
        Self {
            pressure: 0.0,
            mix: GasComposition::air(),
        }
    }
}
