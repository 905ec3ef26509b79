//! Machine-readable reports: serde structures plus content fingerprinting.

use gb_core::units::PressureUnit;
use gb_mix::GasComposition;
use gb_project::BlendProject;
use gb_solver::{BlendAlternative, BlendPlan, ChartRow, Step, Warning};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Stamp carried by every JSON report.
#[derive(Debug, Serialize)]
pub struct ReportMeta {
    pub tool: &'static str,
    pub tool_version: &'static str,
    pub generated_at: String,
    /// SHA256 over the project's canonical JSON form; identical inputs
    /// produce identical fingerprints.
    pub input_fingerprint: String,
}

impl ReportMeta {
    pub fn for_project(project: &BlendProject) -> Self {
        let mut hasher = Sha256::new();
        let json = serde_json::to_string(project).unwrap_or_default();
        hasher.update(json.as_bytes());
        let digest = hasher.finalize();
        Self {
            tool: "gb-cli",
            tool_version: env!("CARGO_PKG_VERSION"),
            generated_at: chrono::Utc::now().to_rfc3339(),
            input_fingerprint: format!("sha256:{digest:x}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MixReport {
    pub o2: f64,
    pub he: f64,
}

impl From<GasComposition> for MixReport {
    fn from(mix: GasComposition) -> Self {
        Self {
            o2: mix.o2_percent(),
            he: mix.he_percent(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StepReport {
    Bleed { amount: f64 },
    Add { gas: String, amount: f64 },
}

#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub meta: ReportMeta,
    pub unit: &'static str,
    pub steps: Vec<StepReport>,
    pub final_pressure: f64,
    pub final_mix: MixReport,
}

impl PlanReport {
    pub fn new(
        meta: ReportMeta,
        unit: PressureUnit,
        plan: &BlendPlan,
        final_pressure: f64,
        final_mix: GasComposition,
    ) -> Self {
        Self {
            meta,
            unit: unit.label(),
            steps: plan.steps.iter().map(|s| step_report(s, unit)).collect(),
            final_pressure: unit.from_canonical(final_pressure),
            final_mix: final_mix.into(),
        }
    }
}

fn step_report(step: &Step, unit: PressureUnit) -> StepReport {
    match step {
        Step::Bleed { amount } => StepReport::Bleed {
            amount: unit.from_canonical(*amount),
        },
        Step::Add { gas, amount } => StepReport::Add {
            gas: gas.name.clone(),
            amount: unit.from_canonical(*amount),
        },
    }
}

#[derive(Debug, Serialize)]
pub struct AlternativeReport {
    pub bleed: f64,
    pub cost: f64,
    pub additions: Vec<StepReport>,
    pub fill_order: Vec<String>,
    pub final_pressure: f64,
    pub final_mix: MixReport,
}

impl AlternativeReport {
    pub fn new(alt: &BlendAlternative, unit: PressureUnit) -> Self {
        Self {
            bleed: unit.from_canonical(alt.bleed),
            cost: alt.cost,
            additions: alt
                .additions
                .iter()
                .map(|ga| StepReport::Add {
                    gas: ga.source.name.clone(),
                    amount: unit.from_canonical(ga.amount),
                })
                .collect(),
            fill_order: alt
                .fill_order
                .iter()
                .map(|ga| ga.source.name.clone())
                .collect(),
            final_pressure: unit.from_canonical(alt.final_pressure),
            final_mix: alt.final_mix.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlternativesReport {
    pub meta: ReportMeta,
    pub unit: &'static str,
    pub selected: usize,
    pub warnings: Vec<String>,
    pub alternatives: Vec<AlternativeReport>,
}

impl AlternativesReport {
    pub fn warnings_from(warnings: &[Warning]) -> Vec<String> {
        warnings.iter().map(|w| w.to_string()).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeReport {
    pub meta: ReportMeta,
    pub unit: &'static str,
    pub required_start_pressure: Option<f64>,
    pub required_start_pressure_error: Option<String>,
    pub max_target_he_percent: Option<f64>,
    pub max_target_he_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChartRowReport {
    pub start_pressure: f64,
    pub helium: Option<f64>,
    pub oxygen: Option<f64>,
    pub top_off: Option<f64>,
    pub error: Option<String>,
}

impl ChartRowReport {
    pub fn new(row: &ChartRow, top_gas_name: &str, unit: PressureUnit) -> Self {
        match &row.outcome {
            Ok(plan) => Self {
                start_pressure: unit.from_canonical(row.start_pressure),
                helium: Some(unit.from_canonical(plan.added_for("Helium"))),
                oxygen: Some(unit.from_canonical(plan.added_for("Oxygen"))),
                top_off: Some(unit.from_canonical(plan.added_for(top_gas_name))),
                error: None,
            },
            Err(err) => Self {
                start_pressure: unit.from_canonical(row.start_pressure),
                helium: None,
                oxygen: None,
                top_off: None,
                error: Some(err.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChartReport {
    pub meta: ReportMeta,
    pub unit: &'static str,
    pub rows: Vec<ChartRowReport>,
}
