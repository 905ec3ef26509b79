//! Top-level solver entry points.

use crate::alternatives::{BlendAlternative, generate_alternatives};
use crate::bleed::bleed_down_two_source;
use crate::cost::CostSettings;
use crate::error::{BlendError, BlendResult};
use crate::plan::BlendPlan;
use crate::two_source::solve_two_source;
use gb_core::numeric::Real;
use gb_mix::{GasSource, TankState};

/// O2 below this is hypoxic at the surface.
pub const HYPOXIC_O2_PERCENT: Real = 18.0;
/// O2 above this requires oxygen-clean equipment and handling.
pub const FIRE_RISK_O2_PERCENT: Real = 40.0;
/// Percentage-point drift between achieved and requested mix worth flagging.
const MIX_DEVIATION_PCT: Real = 0.1;

/// Advisory conditions attached to successful results. Never block success.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    HypoxicMix { o2_percent: Real },
    FireRisk { o2_percent: Real },
    /// The best achievable mix is off the request; the fill may need
    /// trimming afterwards.
    MixDeviation { o2_percent: Real, he_percent: Real },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::HypoxicMix { o2_percent } => write!(
                f,
                "mix is hypoxic at the surface ({o2_percent:.1}% O2 < {HYPOXIC_O2_PERCENT}%)"
            ),
            Warning::FireRisk { o2_percent } => write!(
                f,
                "oxygen-rich mix ({o2_percent:.1}% O2 > {FIRE_RISK_O2_PERCENT}%): oxygen-clean handling required"
            ),
            Warning::MixDeviation {
                o2_percent,
                he_percent,
            } => write!(
                f,
                "achieved mix lands at {o2_percent:.2}/{he_percent:.2}; may need trimming"
            ),
        }
    }
}

/// Result of the multi-source solve: every ranked alternative, which one is
/// selected, and any advisories.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendOutcome {
    pub alternatives: Vec<BlendAlternative>,
    pub selected: usize,
    pub warnings: Vec<Warning>,
}

impl BlendOutcome {
    pub fn selected_alternative(&self) -> &BlendAlternative {
        &self.alternatives[self.selected]
    }
}

/// Solve the single-topping-gas case, venting first when required.
///
/// The direct solve runs first; a `BleedRequired` outcome escalates to the
/// bleed-down search when the tank has anything to vent. All other errors
/// surface unchanged.
pub fn solve_two_source_blend(
    start: &TankState,
    target: &TankState,
    top_gas: &GasSource,
) -> BlendResult<BlendPlan> {
    match solve_two_source(start, target, top_gas) {
        Err(BlendError::BleedRequired { .. }) if start.pressure > 0.0 => {
            bleed_down_two_source(start, target, top_gas)
        }
        other => other,
    }
}

/// Solve the multi-source case: validate, generate ranked alternatives,
/// select one, attach warnings.
pub fn solve_n_gas_blend(
    start: &TankState,
    target: &TankState,
    sources: &[GasSource],
    settings: &CostSettings,
    selected_index: usize,
    max_alternatives: usize,
) -> BlendResult<BlendOutcome> {
    if !(target.pressure > 0.0) {
        return Err(BlendError::TargetPressureInvalid);
    }
    if sources.is_empty() {
        return Err(BlendError::NoGasSources);
    }

    let alternatives = generate_alternatives(start, target, sources, settings, max_alternatives)?;
    let selected = selected_index.min(alternatives.len().saturating_sub(1));

    let mut warnings = Vec::new();
    let o2 = target.mix.o2_percent();
    if o2 < HYPOXIC_O2_PERCENT {
        warnings.push(Warning::HypoxicMix { o2_percent: o2 });
    }
    if o2 > FIRE_RISK_O2_PERCENT {
        warnings.push(Warning::FireRisk { o2_percent: o2 });
    }
    if let Some(alt) = alternatives.get(selected) {
        if !alt.final_mix.approx_eq(&target.mix, MIX_DEVIATION_PCT) {
            warnings.push(Warning::MixDeviation {
                o2_percent: alt.final_mix.o2_percent(),
                he_percent: alt.final_mix.he_percent(),
            });
        }
    }

    Ok(BlendOutcome {
        alternatives,
        selected,
        warnings,
    })
}
