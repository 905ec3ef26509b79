//! Alternative generation: every workable gas combination, priced and
//! ranked.

use std::collections::HashSet;

use crate::cost::{CostSettings, estimate_cost};
use crate::error::{BlendError, BlendResult};
use crate::fill_order::fill_order;
use crate::linear::{solve_gas_pair, solve_gas_triple, solve_single_gas};
use crate::plan::GasAmount;
use crate::two_source::added_requirement;
use gb_core::numeric::{COST_TIE_EPSILON, Real, STEP_EPSILON};
use gb_mix::{GasComposition, GasSource, TankState};
use tracing::debug;

/// How many ranked alternatives to return by default.
pub const DEFAULT_MAX_ALTERNATIVES: usize = 5;

/// Bisection steps for the generator's own bleed search.
pub const ALTERNATIVE_BLEED_ITERATIONS: usize = 20;

/// One feasible way to reach the target, priced and fill-ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendAlternative {
    /// Pressure to vent before filling; 0 when no bleed is needed.
    pub bleed: Real,
    /// Additions in enumeration order.
    pub additions: Vec<GasAmount>,
    /// The same additions in safe fill order.
    pub fill_order: Vec<GasAmount>,
    /// Tank-wide composition after executing this alternative.
    pub final_mix: GasComposition,
    /// Tank pressure after executing this alternative.
    pub final_pressure: Real,
    /// Estimated cost of the added gas.
    pub cost: Real,
}

/// Enumerate all 1-, 2-, and 3-gas combinations that exactly supply the
/// needed addition at start pressure `pressure`.
fn candidates_at(
    start_mix: GasComposition,
    pressure: Real,
    target: &TankState,
    sources: &[GasSource],
) -> BlendResult<Vec<Vec<GasAmount>>> {
    let start = TankState::new(pressure, start_mix);
    let req = added_requirement(&start, target)?;

    if req.total <= STEP_EPSILON {
        // Nothing to add: one empty candidate.
        return Ok(vec![Vec::new()]);
    }

    let needed = GasComposition::new(100.0 * req.o2 / req.total, 100.0 * req.he / req.total)
        .map_err(|_| BlendError::InvalidTargetComposition {
            what: "added portion is not a physical mix",
        })?;

    let keep = |amounts: Vec<GasAmount>| -> Vec<GasAmount> {
        amounts
            .into_iter()
            .filter(|ga| ga.amount > STEP_EPSILON)
            .collect()
    };

    let n = sources.len();
    let mut candidates = Vec::new();
    for i in 0..n {
        if let Some(sol) = solve_single_gas(&needed, req.total, &sources[i]) {
            candidates.push(keep(sol.amounts));
        }
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(sol) = solve_gas_pair(&needed, req.total, &sources[i], &sources[j]) {
                candidates.push(keep(sol.amounts));
            }
        }
    }
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                if let Some(sol) =
                    solve_gas_triple(&needed, req.total, &sources[i], &sources[j], &sources[k])
                {
                    candidates.push(keep(sol.amounts));
                }
            }
        }
    }
    Ok(candidates)
}

/// Generate every feasible alternative for the request, ranked by cost.
///
/// When no combination works directly and there is gas to vent, a bleed
/// search finds the minimal vent-down that unlocks at least one
/// combination, and every surviving alternative carries that bleed.
pub fn generate_alternatives(
    start: &TankState,
    target: &TankState,
    sources: &[GasSource],
    settings: &CostSettings,
    max_alternatives: usize,
) -> BlendResult<Vec<BlendAlternative>> {
    if sources.is_empty() {
        return Err(BlendError::NoGasSources);
    }

    let direct = candidates_at(start.mix, start.pressure, target, sources);
    let (found_pressure, candidates) = match direct {
        Ok(c) if !c.is_empty() => (start.pressure, c),
        Err(
            e @ (BlendError::TargetPressureInvalid
            | BlendError::StartPressureInvalid { .. }
            | BlendError::ImpossibleTarget { .. }),
        ) => return Err(e),
        other => {
            // Nothing works as stated. Vent and retry, if there is
            // anything to vent.
            if start.pressure <= 0.0 {
                return Err(terminal_error(other));
            }
            match bleed_search(start, target, sources) {
                Some(found) => found,
                None => return Err(BlendError::NoValidBlendFound),
            }
        }
    };

    let bleed = start.pressure - found_pressure;
    let mut seen = HashSet::new();
    let mut alternatives = Vec::new();
    for additions in candidates {
        if !seen.insert(dedup_key(&additions)) {
            continue;
        }
        let mut parts = vec![(start.mix, found_pressure)];
        parts.extend(additions.iter().map(|ga| (ga.source.composition, ga.amount)));
        let final_pressure: Real = parts.iter().map(|(_, p)| p).sum();
        let final_mix = GasComposition::blend(&parts).unwrap_or(start.mix);
        let cost = additions
            .iter()
            .map(|ga| estimate_cost(&ga.source.composition, ga.amount, settings))
            .sum();
        alternatives.push(BlendAlternative {
            bleed: if bleed > STEP_EPSILON { bleed } else { 0.0 },
            fill_order: fill_order(&additions),
            additions,
            final_mix,
            final_pressure,
            cost,
        });
    }

    // Ascending cost; ties (within epsilon) keep enumeration order.
    alternatives.sort_by_key(|alt| (alt.cost / COST_TIE_EPSILON).round() as i64);
    alternatives.truncate(max_alternatives);
    Ok(alternatives)
}

/// Bisect over reduced start pressures for the lowest bleed that yields at
/// least one workable combination.
fn bleed_search(
    start: &TankState,
    target: &TankState,
    sources: &[GasSource],
) -> Option<(Real, Vec<Vec<GasAmount>>)> {
    let mut low = 0.0;
    let mut high = start.pressure;
    let mut best = None;
    for _ in 0..ALTERNATIVE_BLEED_ITERATIONS {
        let mid = 0.5 * (low + high);
        match candidates_at(start.mix, mid, target, sources) {
            Ok(c) if !c.is_empty() => {
                best = Some((mid, c));
                low = mid;
            }
            _ => high = mid,
        }
    }
    if let Some((pressure, _)) = &best {
        debug!(pressure, "alternative bleed search converged");
    }
    best
}

fn terminal_error(direct: BlendResult<Vec<Vec<GasAmount>>>) -> BlendError {
    match direct {
        Err(e @ BlendError::InvalidTargetComposition { .. }) => e,
        _ => BlendError::NoValidBlendFound,
    }
}

/// Dedup key: sorted (name, amount-to-0.1-PSI) pairs.
fn dedup_key(additions: &[GasAmount]) -> String {
    let mut parts: Vec<String> = additions
        .iter()
        .map(|ga| format!("{}:{:.1}", ga.source.name, ga.amount))
        .collect();
    parts.sort();
    parts.join("|")
}
