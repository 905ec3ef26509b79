//! Blend plan types: the solver's output.

use crate::error::BlendResult;
use gb_core::numeric::{Real, STEP_EPSILON};
use gb_mix::{GasComposition, GasSource, TankState};

/// One gas addition: a source and how much of it to add (PSI).
#[derive(Debug, Clone, PartialEq)]
pub struct GasAmount {
    pub source: GasSource,
    pub amount: Real,
}

impl GasAmount {
    pub fn new(source: GasSource, amount: Real) -> Self {
        Self { source, amount }
    }
}

/// One step of a blend plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Vent the cylinder down by this much before filling. Always the first
    /// step when present.
    Bleed { amount: Real },
    /// Add `amount` PSI of `gas`.
    Add { gas: GasSource, amount: Real },
}

/// An ordered sequence of steps taking the start tank to the target.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendPlan {
    pub steps: Vec<Step>,
}

impl BlendPlan {
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Pressure vented by the leading bleed step, 0 when there is none.
    pub fn bleed_amount(&self) -> Real {
        match self.steps.first() {
            Some(Step::Bleed { amount }) => *amount,
            _ => 0.0,
        }
    }

    /// Sum of all gas additions.
    pub fn added_total(&self) -> Real {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Add { amount, .. } => *amount,
                Step::Bleed { .. } => 0.0,
            })
            .sum()
    }

    /// Amount added of the named gas, 0 if the plan never adds it.
    pub fn added_for(&self, name: &str) -> Real {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Add { gas, amount } if gas.name == name => *amount,
                _ => 0.0,
            })
            .sum()
    }

    /// The tank state this plan produces when executed from `start`.
    pub fn resulting_state(&self, start: &TankState) -> BlendResult<TankState> {
        let post_bleed = (start.pressure - self.bleed_amount()).max(0.0);
        let mut parts = vec![(start.mix, post_bleed)];
        for step in &self.steps {
            if let Step::Add { gas, amount } = step {
                parts.push((gas.composition, *amount));
            }
        }
        let pressure: Real = parts.iter().map(|(_, p)| p).sum();
        if pressure <= STEP_EPSILON {
            return Ok(TankState::new(0.0, start.mix));
        }
        let mix = GasComposition::blend(&parts)?;
        Ok(TankState::new(pressure, mix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bleed_amount_reads_leading_step() {
        let plan = BlendPlan {
            steps: vec![
                Step::Bleed { amount: 400.0 },
                Step::Add {
                    gas: GasSource::oxygen(),
                    amount: 100.0,
                },
            ],
        };
        assert_eq!(plan.bleed_amount(), 400.0);
        assert_eq!(plan.added_total(), 100.0);
        assert_eq!(plan.added_for("Oxygen"), 100.0);
        assert_eq!(plan.added_for("Helium"), 0.0);
    }

    #[test]
    fn resulting_state_tracks_mass_balance() {
        // 500 psi of EAN32 topped with 2500 psi of air.
        let start = TankState::new(500.0, GasComposition::new(32.0, 0.0).unwrap());
        let plan = BlendPlan {
            steps: vec![Step::Add {
                gas: GasSource::air(),
                amount: 2500.0,
            }],
        };
        let out = plan.resulting_state(&start).unwrap();
        assert!((out.pressure - 3000.0).abs() < 1e-9);
        assert!((out.mix.o2_percent() - 22.8333).abs() < 1e-3);
    }

    #[test]
    fn empty_plan_changes_nothing() {
        let start = TankState::new(1200.0, GasComposition::air());
        let out = BlendPlan::empty().resulting_state(&start).unwrap();
        assert_eq!(out.pressure, 1200.0);
        assert_eq!(out.mix, start.mix);
    }
}
