//! Sensitivity chart: the two-source solve across hypothetical start
//! pressures.

use crate::error::BlendResult;
use crate::plan::BlendPlan;
use crate::two_source::solve_two_source;
use gb_core::numeric::Real;
use gb_mix::{GasSource, TankState};

/// One chart row: the outcome of the solve at a hypothetical start
/// pressure. Infeasible rows keep their error so the display can say why.
#[derive(Debug, Clone)]
pub struct ChartRow {
    pub start_pressure: Real,
    pub outcome: BlendResult<BlendPlan>,
}

/// Re-run the two-source solve at `base.pressure + delta` for each delta.
///
/// Purely compositional: no bleed escalation, no new algorithm. Negative
/// hypothetical pressures clamp to zero.
pub fn project_chart(
    base: &TankState,
    target: &TankState,
    top_gas: &GasSource,
    deltas: &[Real],
) -> Vec<ChartRow> {
    deltas
        .iter()
        .map(|delta| {
            let start_pressure = (base.pressure + delta).max(0.0);
            let attempt = TankState::new(start_pressure, base.mix);
            ChartRow {
                start_pressure,
                outcome: solve_two_source(&attempt, target, top_gas),
            }
        })
        .collect()
}
