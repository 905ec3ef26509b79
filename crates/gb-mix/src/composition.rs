//! Gas composition (O2/He percentages, nitrogen implied).

use crate::error::{MixError, MixResult};
use gb_core::numeric::{COMPOSITION_EPSILON, Real, SINGLE_GAS_TOLERANCE_PCT};

/// A breathing-gas composition defined by oxygen and helium percentages.
///
/// Nitrogen is the implied remainder. Values are validated on construction:
/// both percentages in [0, 100] and their sum at most 100 (with
/// `COMPOSITION_EPSILON` slack on the sum to absorb floating error).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasComposition {
    o2_percent: Real,
    he_percent: Real,
}

impl GasComposition {
    /// Create a validated composition from percentages.
    pub fn new(o2_percent: Real, he_percent: Real) -> MixResult<Self> {
        if !o2_percent.is_finite() || !he_percent.is_finite() {
            return Err(MixError::InvalidMix {
                what: "non-finite percentage",
            });
        }
        if o2_percent < 0.0 || he_percent < 0.0 {
            return Err(MixError::InvalidMix {
                what: "negative percentage",
            });
        }
        if o2_percent > 100.0 || he_percent > 100.0 {
            return Err(MixError::InvalidMix {
                what: "percentage above 100",
            });
        }
        if o2_percent + he_percent > 100.0 + COMPOSITION_EPSILON {
            return Err(MixError::InvalidMix {
                what: "O2 + He above 100",
            });
        }
        Ok(Self {
            o2_percent,
            he_percent,
        })
    }

    /// Clamp arbitrary percentages into the valid domain.
    ///
    /// Each value is clamped into [0, 100]; if the clamped sum still exceeds
    /// 100, helium absorbs the overshoot. Non-finite input clamps to zero.
    pub fn clamped(o2_percent: Real, he_percent: Real) -> Self {
        let o2 = if o2_percent.is_finite() {
            o2_percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let mut he = if he_percent.is_finite() {
            he_percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        if o2 + he > 100.0 {
            he = 100.0 - o2;
        }
        Self {
            o2_percent: o2,
            he_percent: he,
        }
    }

    /// Atmospheric air, 21/0.
    pub fn air() -> Self {
        Self {
            o2_percent: 21.0,
            he_percent: 0.0,
        }
    }

    /// Pure oxygen, 100/0.
    pub fn oxygen() -> Self {
        Self {
            o2_percent: 100.0,
            he_percent: 0.0,
        }
    }

    /// Pure helium, 0/100.
    pub fn helium() -> Self {
        Self {
            o2_percent: 0.0,
            he_percent: 100.0,
        }
    }

    pub fn o2_percent(&self) -> Real {
        self.o2_percent
    }

    pub fn he_percent(&self) -> Real {
        self.he_percent
    }

    pub fn n2_percent(&self) -> Real {
        (100.0 - self.o2_percent - self.he_percent).max(0.0)
    }

    pub fn o2_fraction(&self) -> Real {
        self.o2_percent / 100.0
    }

    pub fn he_fraction(&self) -> Real {
        self.he_percent / 100.0
    }

    pub fn n2_fraction(&self) -> Real {
        self.n2_percent() / 100.0
    }

    /// True for a gas that is effectively pure helium.
    pub fn is_pure_helium(&self) -> bool {
        self.he_percent >= 100.0 - SINGLE_GAS_TOLERANCE_PCT
    }

    /// True for a gas that is effectively pure oxygen.
    pub fn is_pure_oxygen(&self) -> bool {
        self.o2_percent >= 100.0 - SINGLE_GAS_TOLERANCE_PCT
    }

    /// True when both compositions agree within `pct_tol` percentage points
    /// on O2 and He.
    pub fn approx_eq(&self, other: &GasComposition, pct_tol: Real) -> bool {
        (self.o2_percent - other.o2_percent).abs() <= pct_tol
            && (self.he_percent - other.he_percent).abs() <= pct_tol
    }

    /// Pressure-weighted blend of several gas parts.
    ///
    /// Each part is (composition, partial pressure). Parts with negligible
    /// pressure contribute nothing; the total pressure must be positive.
    pub fn blend(parts: &[(GasComposition, Real)]) -> MixResult<GasComposition> {
        let mut total = 0.0;
        let mut o2 = 0.0;
        let mut he = 0.0;
        for (mix, pressure) in parts {
            if !pressure.is_finite() || *pressure < 0.0 {
                return Err(MixError::InvalidBlend {
                    what: "negative or non-finite part pressure",
                });
            }
            total += pressure;
            o2 += pressure * mix.o2_fraction();
            he += pressure * mix.he_fraction();
        }
        if total <= 0.0 {
            return Err(MixError::InvalidBlend {
                what: "blend has no gas",
            });
        }
        GasComposition::new(100.0 * o2 / total, 100.0 * he / total)
    }
}

impl std::fmt::Display for GasComposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.he_percent > 0.0 {
            write!(f, "{:.1}/{:.1}", self.o2_percent, self.he_percent)
        } else {
            write!(f, "EAN{:.0}", self.o2_percent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(GasComposition::air().o2_percent(), 21.0);
        assert_eq!(GasComposition::oxygen().o2_percent(), 100.0);
        assert_eq!(GasComposition::helium().he_percent(), 100.0);
        assert!((GasComposition::air().n2_percent() - 79.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_negative() {
        assert!(GasComposition::new(-1.0, 0.0).is_err());
        assert!(GasComposition::new(21.0, -0.5).is_err());
    }

    #[test]
    fn rejects_above_100() {
        assert!(GasComposition::new(101.0, 0.0).is_err());
        assert!(GasComposition::new(0.0, 100.5).is_err());
    }

    #[test]
    fn rejects_sum_above_100() {
        // Spec scenario: 100.0001% combined must fail.
        assert!(GasComposition::new(60.0, 40.0001).is_err());
        assert!(GasComposition::new(60.0, 40.0).is_ok());
    }

    #[test]
    fn sum_check_tolerates_float_error() {
        // 3 * (100/3) overshoots 100 by ~1ulp; must still validate.
        let third = 100.0 / 3.0;
        assert!(GasComposition::new(third, 2.0 * third).is_ok());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(GasComposition::new(Real::NAN, 0.0).is_err());
        assert!(GasComposition::new(21.0, Real::INFINITY).is_err());
    }

    #[test]
    fn clamped_always_validates() {
        let mix = GasComposition::clamped(150.0, 80.0);
        assert!(GasComposition::new(mix.o2_percent(), mix.he_percent()).is_ok());
        assert_eq!(mix.o2_percent(), 100.0);
        assert_eq!(mix.he_percent(), 0.0);
    }

    #[test]
    fn blend_weighted_average() {
        // 500 psi of 32/0 plus 2500 psi of air lands at 22.833% O2.
        let parts = [
            (GasComposition::new(32.0, 0.0).unwrap(), 500.0),
            (GasComposition::air(), 2500.0),
        ];
        let mixed = GasComposition::blend(&parts).unwrap();
        assert!((mixed.o2_percent() - 22.8333).abs() < 1e-3);
        assert_eq!(mixed.he_percent(), 0.0);
    }

    #[test]
    fn blend_rejects_empty() {
        assert!(GasComposition::blend(&[]).is_err());
        let zero = [(GasComposition::air(), 0.0)];
        assert!(GasComposition::blend(&zero).is_err());
    }

    #[test]
    fn display_formats() {
        assert_eq!(GasComposition::air().to_string(), "EAN21");
        let tmx = GasComposition::new(18.0, 45.0).unwrap();
        assert_eq!(tmx.to_string(), "18.0/45.0");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use gb_core::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        // Validator idempotence: anything pushed through clamped() passes new().
        #[test]
        fn clamped_is_always_valid(o2 in -200.0_f64..300.0, he in -200.0_f64..300.0) {
            let mix = GasComposition::clamped(o2, he);
            prop_assert!(GasComposition::new(mix.o2_percent(), mix.he_percent()).is_ok());
        }

        #[test]
        fn fractions_sum_at_most_one(o2 in 0.0_f64..100.0, he in 0.0_f64..100.0) {
            if let Ok(mix) = GasComposition::new(o2, he) {
                let sum = mix.o2_fraction() + mix.he_fraction() + mix.n2_fraction();
                let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
                prop_assert!(nearly_equal(sum, 1.0, tol));
            }
        }
    }
}
