// gb-core/src/units.rs

use crate::numeric::Real;
use uom::si::f64::Pressure as UomPressure;
use uom::si::pressure::{bar as uom_bar, pound_force_per_square_inch as uom_psi};

/// Public canonical pressure quantity (uom, f64).
///
/// The engine interior computes in plain `Real` canonical PSI; this type
/// exists for the call boundary, where display-unit values are converted
/// exactly once.
pub type Pressure = UomPressure;

#[inline]
pub fn psi(v: Real) -> Pressure {
    Pressure::new::<uom_psi>(v)
}

#[inline]
pub fn bar(v: Real) -> Pressure {
    Pressure::new::<uom_bar>(v)
}

#[inline]
pub fn as_psi(p: Pressure) -> Real {
    p.get::<uom_psi>()
}

#[inline]
pub fn as_bar(p: Pressure) -> Real {
    p.get::<uom_bar>()
}

/// Display unit selected by the caller. Conversion to the engine's
/// canonical PSI happens at the boundary only; no solver reads this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PressureUnit {
    #[default]
    Psi,
    Bar,
}

impl PressureUnit {
    /// Convert a display-unit value into canonical PSI.
    pub fn to_canonical(self, v: Real) -> Real {
        match self {
            PressureUnit::Psi => v,
            PressureUnit::Bar => as_psi(bar(v)),
        }
    }

    /// Convert a canonical-PSI value back into this display unit.
    pub fn from_canonical(self, v: Real) -> Real {
        match self {
            PressureUnit::Psi => v,
            PressureUnit::Bar => as_bar(psi(v)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PressureUnit::Psi => "PSI",
            PressureUnit::Bar => "bar",
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn unit_round_trip(v in 0.0_f64..20_000.0, unit in prop_oneof![Just(PressureUnit::Psi), Just(PressureUnit::Bar)]) {
            let canonical = unit.to_canonical(v);
            let back = unit.from_canonical(canonical);
            prop_assert!((back - v).abs() <= 1e-9 * v.max(1.0));
        }
    }
}
