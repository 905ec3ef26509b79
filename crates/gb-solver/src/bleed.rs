//! Bleed-down search: minimal venting that makes a two-source blend work.

use crate::error::{BlendError, BlendResult};
use crate::plan::{BlendPlan, Step};
use crate::two_source::solve_two_source;
use gb_core::numeric::STEP_EPSILON;
use gb_mix::{GasSource, TankState};
use tracing::{debug, trace};

/// Bisection steps over the start-pressure range. 32 halvings of a
/// 10,000 PSI range resolve the feasibility boundary to well under
/// a thousandth of a PSI.
pub const BLEED_SEARCH_ITERATIONS: usize = 32;

/// Find the smallest vent-down that lets the two-source solver succeed.
///
/// Bisects candidate start pressures in [0, start]; composition stays fixed
/// while pressure scales down. Feasibility is monotone here (every
/// component delta shrinks as start pressure grows), so a successful
/// attempt raises the low bracket and the search converges onto the highest
/// feasible start pressure, i.e. the minimal bleed. The returned plan leads
/// with the bleed step and carries the additions computed at the found
/// pressure.
pub fn bleed_down_two_source(
    start: &TankState,
    target: &TankState,
    top_gas: &GasSource,
) -> BlendResult<BlendPlan> {
    let mut low = 0.0;
    let mut high = start.pressure;
    let mut best: Option<(f64, BlendPlan)> = None;
    let mut last_error = BlendError::BleedRequired {
        what: "no feasible start pressure attempted",
    };

    for iter in 0..BLEED_SEARCH_ITERATIONS {
        let mid = 0.5 * (low + high);
        let attempt = TankState::new(mid, start.mix);
        match solve_two_source(&attempt, target, top_gas) {
            Ok(plan) => {
                trace!(iter, pressure = mid, "bleed attempt feasible");
                best = Some((mid, plan));
                low = mid;
            }
            Err(err) => {
                trace!(iter, pressure = mid, %err, "bleed attempt infeasible");
                last_error = err;
                high = mid;
            }
        }
    }

    match best {
        Some((found, plan)) => {
            let bleed = start.pressure - found;
            debug!(found, bleed, "bleed-down search converged");
            let mut steps = Vec::with_capacity(plan.steps.len() + 1);
            if bleed > STEP_EPSILON {
                steps.push(Step::Bleed { amount: bleed });
            }
            steps.extend(plan.steps);
            Ok(BlendPlan { steps })
        }
        None => Err(BlendError::BleedSolutionNotFound {
            last_error: last_error.to_string(),
        }),
    }
}
