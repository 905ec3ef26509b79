//! Reverse solvers: invert the two-source solve by bisection.
//!
//! Both answer "helium-avoidance" questions a fill operator actually asks:
//! how much gas must stay in the tank, or how much target helium is
//! reachable, before any helium has to be bought. Both require the direct
//! two-source solve to succeed without bleeding first.

use crate::error::{BlendError, BlendResult};
use crate::two_source::solve_two_source;
use gb_core::numeric::{PRESSURE_TOLERANCE, Real, STEP_EPSILON};
use gb_mix::{GasComposition, GasSource, TankState};
use tracing::debug;

/// Bisection steps for both reverse searches.
pub const REVERSE_SEARCH_ITERATIONS: usize = 40;

/// Highest start pressure at which the blend needs no added helium.
///
/// Bisects start pressure over [0, target]; feasible attempts raise the low
/// bracket, bleed-requiring ones are out of range and lower the high
/// bracket. At the feasibility boundary the binding component's addition
/// reaches zero; if that component is not helium, no start pressure avoids
/// buying helium and the solver fails.
pub fn solve_required_start_pressure(
    start: &TankState,
    target: &TankState,
    top_gas: &GasSource,
) -> BlendResult<Real> {
    // Precondition: the stated request solves directly.
    solve_two_source(start, target, top_gas)?;

    let mut low = 0.0;
    let mut high = target.pressure;
    let mut best = None;

    for _ in 0..REVERSE_SEARCH_ITERATIONS {
        let mid = 0.5 * (low + high);
        let attempt = TankState::new(mid, start.mix);
        match solve_two_source(&attempt, target, top_gas) {
            Ok(plan) => {
                best = Some((mid, plan));
                low = mid;
            }
            Err(_) => high = mid,
        }
    }

    match best {
        Some((pressure, plan)) if plan.added_for("Helium") <= PRESSURE_TOLERANCE => {
            debug!(pressure, "helium-free start pressure found");
            Ok(pressure)
        }
        _ => Err(BlendError::NoHeliumFreeSolution {
            what: "helium is still required at the highest feasible start pressure",
        }),
    }
}

/// Highest target He% reachable without adding any helium.
///
/// The start tank's helium is inherited but none is purchased. Bisects the
/// target helium percentage over [0, 100 - target O2%]. A percentage whose
/// helium partial pressure exceeds what the tank inherits would need a
/// purchase, so the high bracket drops; one below the inherited level needs
/// a bleed, so the low bracket rises. The brackets pinch onto the inherited
/// helium level, where the attempt must still solve for the remaining
/// components.
pub fn solve_max_target_helium(
    start: &TankState,
    target: &TankState,
    top_gas: &GasSource,
) -> BlendResult<Real> {
    solve_two_source(start, target, top_gas)?;

    let inherited_he = start.pressure * start.mix.he_fraction();
    let mut low = 0.0;
    let mut high = 100.0 - target.mix.o2_percent();
    let mut best = None;

    for _ in 0..REVERSE_SEARCH_ITERATIONS {
        let mid = 0.5 * (low + high);
        let needed_he = target.pressure * mid / 100.0 - inherited_he;
        if needed_he > STEP_EPSILON {
            // This much target helium would have to be bought.
            high = mid;
            continue;
        }
        let solved = GasComposition::new(target.mix.o2_percent(), mid)
            .ok()
            .and_then(|mix| {
                solve_two_source(start, &TankState::new(target.pressure, mix), top_gas).ok()
            })
            .filter(|plan| plan.added_for("Helium") <= STEP_EPSILON);
        match solved {
            Some(_) => {
                best = Some(mid);
                low = mid;
            }
            // Below the inherited level (or otherwise infeasible): push up.
            None => low = mid,
        }
    }

    match best {
        Some(he_percent) => {
            debug!(he_percent, "max helium-free target found");
            Ok(he_percent)
        }
        None => Err(BlendError::NoHeliumFreeSolution {
            what: "no target helium percentage works without adding helium",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tank(pressure: Real, o2: Real, he: Real) -> TankState {
        TankState::new(pressure, GasComposition::new(o2, he).unwrap())
    }

    #[test]
    fn start_pressure_boundary_for_helium_rich_tank() {
        // 35% He on board against a 10% He target: helium stops being
        // needed exactly at target * heT / heS.
        let start = tank(500.0, 21.0, 35.0);
        let target = tank(3000.0, 21.0, 10.0);
        let p = solve_required_start_pressure(&start, &target, &GasSource::air()).unwrap();
        assert!((p - 3000.0 * 0.10 / 0.35).abs() < 1.0);
    }

    #[test]
    fn helium_free_target_cannot_be_reached_when_he_never_binds() {
        // Start tank has no helium: every feasible start pressure still
        // needs the full helium delta.
        let start = tank(500.0, 21.0, 0.0);
        let target = tank(3000.0, 21.0, 30.0);
        let err = solve_required_start_pressure(&start, &target, &GasSource::air()).unwrap_err();
        assert!(matches!(err, BlendError::NoHeliumFreeSolution { .. }));
    }

    #[test]
    fn helium_free_start_without_helium_anywhere() {
        // Nitrox-only request: helium is trivially never needed, and the
        // answer is the feasibility boundary.
        let start = tank(500.0, 32.0, 0.0);
        let target = tank(3000.0, 32.0, 0.0);
        let p = solve_required_start_pressure(&start, &target, &GasSource::air()).unwrap();
        assert!(p > 500.0);
    }

    #[test]
    fn max_helium_matches_inherited_helium() {
        // With 500 psi of 21/35 on board and no helium purchased, the
        // final 3000 psi can carry at most 500 * 0.35 psi of helium.
        let start = tank(500.0, 21.0, 35.0);
        let target = tank(3000.0, 21.0, 10.0);
        let he = solve_max_target_helium(&start, &target, &GasSource::air()).unwrap();
        assert!((he - 100.0 * (500.0 * 0.35) / 3000.0).abs() < 0.1);
    }

    #[test]
    fn max_helium_is_zero_for_helium_free_tank() {
        let start = tank(500.0, 21.0, 0.0);
        let target = tank(3000.0, 21.0, 0.0);
        let he = solve_max_target_helium(&start, &target, &GasSource::air()).unwrap();
        assert!(he < 0.1);
    }

    #[test]
    fn precondition_propagates() {
        // Direct solve needs a bleed, so the reverse solver refuses.
        let start = tank(3400.0, 21.0, 0.0);
        let target = tank(3000.0, 21.0, 0.0);
        let err = solve_required_start_pressure(&start, &target, &GasSource::air()).unwrap_err();
        assert!(matches!(err, BlendError::BleedRequired { .. }));
    }
}
