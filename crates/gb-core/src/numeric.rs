use crate::GbError;

/// Floating point type used throughout the engine
pub type Real = f64;

/// Slack on the O2+He percentage sum check. Absorbs accumulated rounding
/// from repeated percent<->fraction conversion without letting a genuinely
/// over-100% mix through.
pub const COMPOSITION_EPSILON: Real = 1e-9;

/// Agreement required between a finished plan's resulting pressure and the
/// requested target, in canonical pressure units (PSI). A blend that lands
/// further away than this is a solver defect, not an acceptable answer.
pub const PRESSURE_TOLERANCE: Real = 0.5;

/// Smallest gas addition worth emitting as a plan step (PSI). Solved
/// amounts inside (-STEP_EPSILON, STEP_EPSILON) are numerical residue and
/// clamp to zero; anything more negative is a real infeasibility.
pub const STEP_EPSILON: Real = 0.01;

/// Fraction-level slack used where the algebra works on fractions rather
/// than pressures (e.g. the nitrogen-balance check for N2-free top gases).
pub const FRACTION_EPSILON: Real = 1e-4;

/// Width, in percentage points, inside which a single candidate gas counts
/// as matching the needed added composition. Kept tight so a lone gas is
/// not reported where a two-gas blend was wanted.
pub const SINGLE_GAS_TOLERANCE_PCT: Real = 0.5;

/// Determinant magnitude below which a gas-composition matrix is treated
/// as singular (linearly dependent sources).
pub const DETERMINANT_EPSILON: Real = 1e-9;

/// Cost difference below which two alternatives rank as a tie; ties keep
/// their stable input order.
pub const COST_TIE_EPSILON: Real = 1e-6;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, GbError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GbError::NonFinite { what, value: v })
    }
}
