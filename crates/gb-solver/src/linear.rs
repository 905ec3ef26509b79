//! Direct linear solves for 1-, 2-, and 3-gas additions.
//!
//! Works purely on the *added* portion: given the composition the addition
//! must have and how much total pressure it must contribute, find per-gas
//! amounts. Degenerate systems (linearly dependent sources) are rejected or
//! routed through a reduced solve rather than inverted blindly.

use crate::plan::GasAmount;
use gb_core::numeric::{DETERMINANT_EPSILON, FRACTION_EPSILON, Real, SINGLE_GAS_TOLERANCE_PCT, STEP_EPSILON};
use gb_mix::{GasComposition, GasSource};
use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};

/// Acceptance floor for the over-determined total-pressure check (PSI).
///
/// The 2x2 and 3x3 systems do not constrain total pressure exactly; these
/// thresholds are pragmatic acceptance knobs carried from field practice,
/// not derived physical bounds. Widen or tighten deliberately.
pub const TOTAL_TOLERANCE_FLOOR: Real = 1.0;
/// Relative slack on the 2-gas total-pressure check.
pub const TWO_GAS_TOTAL_TOLERANCE: Real = 0.005;
/// Relative slack on the 3-gas total-pressure check.
pub const THREE_GAS_TOTAL_TOLERANCE: Real = 0.01;

/// A solved addition: per-gas amounts plus the composition the added
/// portion actually achieves, for verification against the request.
#[derive(Debug, Clone, PartialEq)]
pub struct NGasSolution {
    pub amounts: Vec<GasAmount>,
    pub added_mix: GasComposition,
}

fn solution(amounts: Vec<GasAmount>) -> Option<NGasSolution> {
    let parts: Vec<(GasComposition, Real)> = amounts
        .iter()
        .map(|ga| (ga.source.composition, ga.amount))
        .collect();
    let added_mix = GasComposition::blend(&parts).ok()?;
    Some(NGasSolution { amounts, added_mix })
}

/// Clamp numerical residue to zero; anything truly negative is rejected.
fn clamp_amount(v: Real) -> Option<Real> {
    if v < -STEP_EPSILON {
        None
    } else {
        Some(v.max(0.0))
    }
}

/// One gas alone: only an (almost) exact composition match will do.
pub fn solve_single_gas(
    needed: &GasComposition,
    added_pressure: Real,
    gas: &GasSource,
) -> Option<NGasSolution> {
    if added_pressure <= STEP_EPSILON {
        return None;
    }
    if !gas.composition.approx_eq(needed, SINGLE_GAS_TOLERANCE_PCT) {
        return None;
    }
    solution(vec![GasAmount::new(gas.clone(), added_pressure)])
}

/// Two gases: Cramer on the O2/He matrix, with a reduced oxygen-only solve
/// when both gases (and the request) are helium-free and the matrix is
/// singular.
pub fn solve_gas_pair(
    needed: &GasComposition,
    added_pressure: Real,
    a: &GasSource,
    b: &GasSource,
) -> Option<NGasSolution> {
    if added_pressure <= STEP_EPSILON {
        return None;
    }
    let (o2a, hea) = (a.composition.o2_fraction(), a.composition.he_fraction());
    let (o2b, heb) = (b.composition.o2_fraction(), b.composition.he_fraction());
    let rhs = Vector2::new(
        added_pressure * needed.o2_fraction(),
        added_pressure * needed.he_fraction(),
    );

    let m = Matrix2::new(o2a, o2b, hea, heb);
    let det = m.determinant();

    let (amount_a, amount_b) = if det.abs() > DETERMINANT_EPSILON {
        let det_a = Matrix2::new(rhs.x, o2b, rhs.y, heb).determinant();
        let det_b = Matrix2::new(o2a, rhs.x, hea, rhs.y).determinant();
        (det_a / det, det_b / det)
    } else {
        // Singular: every helium-free pair lands here. Solve on oxygen
        // alone with the total-pressure constraint substituted in.
        if hea > FRACTION_EPSILON || heb > FRACTION_EPSILON || needed.he_fraction() > FRACTION_EPSILON
        {
            return None;
        }
        if (o2a - o2b).abs() <= DETERMINANT_EPSILON {
            // Identical gases; the single-gas path owns this case.
            return None;
        }
        let amount_a = added_pressure * (needed.o2_fraction() - o2b) / (o2a - o2b);
        (amount_a, added_pressure - amount_a)
    };

    let amount_a = clamp_amount(amount_a)?;
    let amount_b = clamp_amount(amount_b)?;

    let tolerance = TOTAL_TOLERANCE_FLOOR.max(TWO_GAS_TOTAL_TOLERANCE * added_pressure);
    if (amount_a + amount_b - added_pressure).abs() > tolerance {
        return None;
    }

    solution(vec![
        GasAmount::new(a.clone(), amount_a),
        GasAmount::new(b.clone(), amount_b),
    ])
}

/// Three gases: Cramer on the augmented total/O2/He system.
pub fn solve_gas_triple(
    needed: &GasComposition,
    added_pressure: Real,
    a: &GasSource,
    b: &GasSource,
    c: &GasSource,
) -> Option<NGasSolution> {
    if added_pressure <= STEP_EPSILON {
        return None;
    }
    let m = Matrix3::new(
        1.0,
        1.0,
        1.0,
        a.composition.o2_fraction(),
        b.composition.o2_fraction(),
        c.composition.o2_fraction(),
        a.composition.he_fraction(),
        b.composition.he_fraction(),
        c.composition.he_fraction(),
    );
    let rhs = Vector3::new(
        added_pressure,
        added_pressure * needed.o2_fraction(),
        added_pressure * needed.he_fraction(),
    );

    let det = m.determinant();
    if det.abs() <= DETERMINANT_EPSILON {
        return None;
    }

    let mut amounts = [0.0; 3];
    for (j, amount) in amounts.iter_mut().enumerate() {
        let mut mj = m;
        mj.set_column(j, &rhs);
        *amount = mj.determinant() / det;
    }

    let amount_a = clamp_amount(amounts[0])?;
    let amount_b = clamp_amount(amounts[1])?;
    let amount_c = clamp_amount(amounts[2])?;

    let tolerance = TOTAL_TOLERANCE_FLOOR.max(THREE_GAS_TOTAL_TOLERANCE * added_pressure);
    if (amount_a + amount_b + amount_c - added_pressure).abs() > tolerance {
        return None;
    }

    solution(vec![
        GasAmount::new(a.clone(), amount_a),
        GasAmount::new(b.clone(), amount_b),
        GasAmount::new(c.clone(), amount_c),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mix(o2: Real, he: Real) -> GasComposition {
        GasComposition::new(o2, he).unwrap()
    }

    #[test]
    fn single_gas_exact_match() {
        let sol = solve_single_gas(&mix(21.0, 0.0), 2500.0, &GasSource::air()).unwrap();
        assert_eq!(sol.amounts.len(), 1);
        assert_eq!(sol.amounts[0].amount, 2500.0);
    }

    #[test]
    fn single_gas_near_miss_rejected() {
        // 0.5 percentage points is the cutoff; 1 point off must fail.
        let gas = GasSource::new("EAN22", mix(22.0, 0.0));
        assert!(solve_single_gas(&mix(21.0, 0.0), 2500.0, &gas).is_none());
    }

    #[test]
    fn helium_free_pair_uses_reduced_solve() {
        // Air + O2 to EAN32 from empty: the O2/He matrix is singular, the
        // oxygen-only solve applies: 3000 * (32-100)/(21-100) air.
        let sol = solve_gas_pair(&mix(32.0, 0.0), 3000.0, &GasSource::air(), &GasSource::oxygen())
            .unwrap();
        let air = sol.amounts[0].amount;
        let o2 = sol.amounts[1].amount;
        assert!((air - 3000.0 * (0.32 - 1.0) / (0.21 - 1.0)).abs() < 0.1);
        assert!((o2 - (3000.0 - air)).abs() < 1e-9);
        assert!((sol.added_mix.o2_percent() - 32.0).abs() < 0.01);
    }

    #[test]
    fn helium_pair_uses_cramer() {
        // Helium + EAN50 for a 25/50 addition.
        let ean50 = GasSource::new("EAN50", mix(50.0, 0.0));
        let sol = solve_gas_pair(&mix(25.0, 50.0), 2000.0, &GasSource::helium(), &ean50).unwrap();
        let he = sol.amounts[0].amount;
        let nx = sol.amounts[1].amount;
        // O2: 0.5 * nx = 2000 * 0.25; He: 1.0 * he = 2000 * 0.5.
        assert!((nx - 1000.0).abs() < 0.1);
        assert!((he - 1000.0).abs() < 0.1);
    }

    #[test]
    fn pair_total_pressure_mismatch_rejected() {
        // He/O2 solve for a mix that leaves nitrogen unaccounted: the two
        // equations solve but the amounts cannot reach the total.
        let sol = solve_gas_pair(
            &mix(21.0, 0.0),
            3000.0,
            &GasSource::oxygen(),
            &GasSource::helium(),
        );
        assert!(sol.is_none());
    }

    #[test]
    fn pair_negative_amount_rejected() {
        // Reaching EAN21 exactly from EAN32 and O2 would need negative O2.
        let ean32 = GasSource::new("EAN32", mix(32.0, 0.0));
        let sol = solve_gas_pair(&mix(40.0, 0.0), 3000.0, &ean32, &GasSource::air());
        assert!(sol.is_none());
    }

    #[test]
    fn triple_solves_trimix() {
        // Air + O2 + He to 18/45.
        let sol = solve_gas_triple(
            &mix(18.0, 45.0),
            3000.0,
            &GasSource::air(),
            &GasSource::oxygen(),
            &GasSource::helium(),
        )
        .unwrap();
        let total: Real = sol.amounts.iter().map(|g| g.amount).sum();
        assert!((total - 3000.0).abs() < 0.01);
        assert!((sol.added_mix.o2_percent() - 18.0).abs() < 0.01);
        assert!((sol.added_mix.he_percent() - 45.0).abs() < 0.01);
    }

    #[test]
    fn triple_rejects_dependent_gases() {
        // Three gases with identical O2/He ratios: singular system.
        let a = GasSource::new("A", mix(20.0, 20.0));
        let b = GasSource::new("B", mix(20.0, 20.0));
        let c = GasSource::new("C", mix(20.0, 20.0));
        assert!(solve_gas_triple(&mix(20.0, 20.0), 3000.0, &a, &b, &c).is_none());
    }

    #[test]
    fn triple_rejects_negative_component() {
        // 10/40 needs the nitrogen of ~1900 psi air, whose own oxygen
        // already exceeds the 300 psi O2 budget: pure O2 would go negative.
        let sol = solve_gas_triple(
            &mix(10.0, 40.0),
            3000.0,
            &GasSource::air(),
            &GasSource::oxygen(),
            &GasSource::helium(),
        );
        assert!(sol.is_none());
    }
}
