//! Single-topping-gas blend solver.
//!
//! Solves for helium, oxygen, and top-off additions that take a start tank
//! to a target state, where all nitrogen must come from the top-off gas's
//! own composition. Infeasibility that venting would fix is reported as
//! `BleedRequired` so callers can escalate to the bleed-down search.

use crate::error::{BlendError, BlendResult};
use crate::plan::{BlendPlan, Step};
use gb_core::numeric::{
    FRACTION_EPSILON, PRESSURE_TOLERANCE, Real, STEP_EPSILON, ensure_finite,
};
use gb_mix::{GasComposition, GasSource, TankState};

/// Partial-pressure deltas between target and start, per component (PSI).
#[derive(Debug, Clone, Copy)]
pub(crate) struct AddedRequirement {
    pub total: Real,
    pub o2: Real,
    pub he: Real,
    pub n2: Real,
}

/// Compute what must be added, independent of which gases will supply it.
///
/// Runs the shared feasibility checks: positive target pressure, start not
/// above target, no component already over its target partial pressure.
pub(crate) fn added_requirement(
    start: &TankState,
    target: &TankState,
) -> BlendResult<AddedRequirement> {
    if !(target.pressure > 0.0) {
        return Err(BlendError::TargetPressureInvalid);
    }
    ensure_finite(start.pressure, "start pressure")
        .map_err(|_| BlendError::StartPressureInvalid { what: "non-finite" })?;
    if start.pressure < 0.0 {
        return Err(BlendError::StartPressureInvalid { what: "negative" });
    }
    if start.pressure > target.pressure + PRESSURE_TOLERANCE {
        return Err(BlendError::BleedRequired {
            what: "start pressure above target",
        });
    }

    // Raw nitrogen remainder, unclamped: a target that allocates more than
    // 100% to O2+He has negative nitrogen and no gas can remove it.
    let target_n2 = 1.0 - target.mix.o2_fraction() - target.mix.he_fraction();
    if target_n2 < -FRACTION_EPSILON {
        return Err(BlendError::ImpossibleTarget {
            what: "negative nitrogen remainder",
        });
    }

    let o2 = target.pressure * target.mix.o2_fraction() - start.pressure * start.mix.o2_fraction();
    let he = target.pressure * target.mix.he_fraction() - start.pressure * start.mix.he_fraction();
    let n2 = target.pressure * target_n2.max(0.0) - start.pressure * start.mix.n2_fraction();
    let total = target.pressure - start.pressure;

    if o2 < -STEP_EPSILON {
        return Err(BlendError::BleedRequired {
            what: "start tank already exceeds target oxygen",
        });
    }
    if he < -STEP_EPSILON {
        return Err(BlendError::BleedRequired {
            what: "start tank already exceeds target helium",
        });
    }
    if n2 < -STEP_EPSILON {
        return Err(BlendError::BleedRequired {
            what: "start tank already exceeds target nitrogen",
        });
    }

    Ok(AddedRequirement { total, o2, he, n2 })
}

/// Solve the two-source case: pure helium, pure oxygen, and one top-off gas.
///
/// Returns a plan whose additions are ordered Helium, Oxygen, top-off, with
/// zero-amount steps dropped. Never bleeds; a `BleedRequired` error tells
/// the caller to run the bleed-down search instead.
pub fn solve_two_source(
    start: &TankState,
    target: &TankState,
    top_gas: &GasSource,
) -> BlendResult<BlendPlan> {
    let req = added_requirement(start, target)?;

    // Already at target.
    if req.total.abs() <= STEP_EPSILON {
        return Ok(BlendPlan::empty());
    }

    let top = &top_gas.composition;
    let (mut he_add, mut o2_add, mut top_add) = if top.n2_fraction() > FRACTION_EPSILON {
        // All needed nitrogen comes from the top-off gas, which drags its
        // own O2 and He along; the pure additions make up the difference.
        let top_amount = req.n2 / top.n2_fraction();
        (
            req.he - top.he_fraction() * top_amount,
            req.o2 - top.o2_fraction() * top_amount,
            top_amount,
        )
    } else {
        // An N2-free top gas cannot supply nitrogen balance; the request
        // must already need none.
        if (req.total - req.he - req.o2).abs() > FRACTION_EPSILON {
            return Err(BlendError::UnreachableWithTopGas {
                what: "target needs nitrogen the top-off gas does not carry",
            });
        }
        (req.he, req.o2, 0.0)
    };

    for amount in [he_add, o2_add, top_add] {
        if amount < -STEP_EPSILON {
            return Err(BlendError::BleedRequired {
                what: "solved addition is negative",
            });
        }
    }
    he_add = he_add.max(0.0);
    o2_add = o2_add.max(0.0);
    top_add = top_add.max(0.0);

    let final_pressure = start.pressure + he_add + o2_add + top_add;
    if (final_pressure - target.pressure).abs() > PRESSURE_TOLERANCE {
        return Err(BlendError::ToleranceExceeded {
            what: format!(
                "plan reaches {final_pressure:.2} PSI, target {:.2} PSI",
                target.pressure
            ),
        });
    }

    let mut steps = Vec::new();
    if he_add > STEP_EPSILON {
        steps.push(Step::Add {
            gas: GasSource::helium(),
            amount: he_add,
        });
    }
    if o2_add > STEP_EPSILON {
        steps.push(Step::Add {
            gas: GasSource::oxygen(),
            amount: o2_add,
        });
    }
    if top_add > STEP_EPSILON {
        steps.push(Step::Add {
            gas: top_gas.clone(),
            amount: top_add,
        });
    }
    Ok(BlendPlan { steps })
}

/// Project what simply topping off to `target_pressure` with `gas` yields.
///
/// No solving involved: the start contents stay put and the top gas fills
/// the remainder.
pub fn top_off_blend(
    start: &TankState,
    target_pressure: Real,
    gas: &GasSource,
) -> BlendResult<TankState> {
    if !(target_pressure > 0.0) {
        return Err(BlendError::TargetPressureInvalid);
    }
    if start.pressure > target_pressure + PRESSURE_TOLERANCE {
        return Err(BlendError::BleedRequired {
            what: "start pressure above top-off target",
        });
    }
    let added = (target_pressure - start.pressure).max(0.0);
    let mix = GasComposition::blend(&[(start.mix, start.pressure), (gas.composition, added)])?;
    Ok(TankState::new(target_pressure, mix))
}
