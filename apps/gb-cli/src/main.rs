use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use gb_project::{BlendProject, ProjectError, ResolvedRequest, load_project, resolve_project, validate_project};
use gb_solver::{
    BlendError, Step, project_chart, solve_max_target_helium, solve_n_gas_blend,
    solve_required_start_pressure, solve_two_source_blend,
};

mod report;
use report::{
    AlternativeReport, AlternativesReport, AnalyzeReport, ChartReport, ChartRowReport, PlanReport,
    ReportMeta,
};

#[derive(Parser)]
#[command(name = "gb-cli")]
#[command(about = "Gasblend CLI - partial-pressure blend planning tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Plan a two-source blend (helium + oxygen + the project's top-off gas)
    Plan {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Emit a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Rank every workable combination of the project's source gases
    Alternatives {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Alternative index to select (defaults to cheapest)
        #[arg(long)]
        select: Option<usize>,
        /// Emit a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Helium-avoidance analysis: start pressure and target He boundaries
    Analyze {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Emit a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Re-run the plan across hypothetical start pressures
    Chart {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Start-pressure increment per row (display units)
        #[arg(long, default_value_t = 250.0)]
        step: f64,
        /// Number of rows
        #[arg(long, default_value_t = 8)]
        count: usize,
        /// Emit a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("Blend failed: {0}")]
    Blend(#[from] BlendError),

    #[error("Project has no top_off gas; `{0}` needs one")]
    MissingTopOff(&'static str),

    #[error("Report serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Plan { project_path, json } => cmd_plan(&project_path, json),
        Commands::Alternatives {
            project_path,
            select,
            json,
        } => cmd_alternatives(&project_path, select.unwrap_or(0), json),
        Commands::Analyze { project_path, json } => cmd_analyze(&project_path, json),
        Commands::Chart {
            project_path,
            step,
            count,
            json,
        } => cmd_chart(&project_path, step, count, json),
    }
}

fn load_and_resolve(path: &Path) -> CliResult<(BlendProject, ResolvedRequest)> {
    let project = load_project(path)?;
    let resolved = resolve_project(&project)?;
    Ok((project, resolved))
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = load_project(project_path)?;
    validate_project(&project).map_err(ProjectError::from)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_plan(project_path: &Path, json: bool) -> CliResult<()> {
    let (project, resolved) = load_and_resolve(project_path)?;
    let top_gas = resolved
        .top_off
        .as_ref()
        .ok_or(CliError::MissingTopOff("plan"))?;

    let plan = solve_two_source_blend(&resolved.start, &resolved.target, top_gas)?;
    let out = plan.resulting_state(&resolved.start)?;
    let unit = resolved.unit;

    if json {
        let report = PlanReport::new(
            ReportMeta::for_project(&project),
            unit,
            &plan,
            out.pressure,
            out.mix,
        );
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if plan.is_empty() {
        println!("✓ Tank is already at the target; nothing to add");
        return Ok(());
    }
    println!("Blend plan ({}):", unit.label());
    for step in &plan.steps {
        match step {
            Step::Bleed { amount } => {
                println!("  Bleed down {:.1} {}", unit.from_canonical(*amount), unit.label());
            }
            Step::Add { gas, amount } => {
                println!(
                    "  Add {:>8.1} {} of {}",
                    unit.from_canonical(*amount),
                    unit.label(),
                    gas.name
                );
            }
        }
    }
    println!(
        "✓ Final: {:.1} {} of {}",
        unit.from_canonical(out.pressure),
        unit.label(),
        out.mix
    );
    Ok(())
}

fn cmd_alternatives(project_path: &Path, select: usize, json: bool) -> CliResult<()> {
    let (project, resolved) = load_and_resolve(project_path)?;

    let outcome = solve_n_gas_blend(
        &resolved.start,
        &resolved.target,
        &resolved.sources,
        &resolved.cost,
        select,
        resolved.max_alternatives,
    )?;
    let unit = resolved.unit;

    if json {
        let report = AlternativesReport {
            meta: ReportMeta::for_project(&project),
            unit: unit.label(),
            selected: outcome.selected,
            warnings: AlternativesReport::warnings_from(&outcome.warnings),
            alternatives: outcome
                .alternatives
                .iter()
                .map(|alt| AlternativeReport::new(alt, unit))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for warning in &outcome.warnings {
        println!("! {warning}");
    }
    println!("Alternatives (cheapest first, {}):", unit.label());
    for (i, alt) in outcome.alternatives.iter().enumerate() {
        let marker = if i == outcome.selected { ">" } else { " " };
        let additions: Vec<String> = alt
            .fill_order
            .iter()
            .map(|ga| format!("{} {:.1}", ga.source.name, unit.from_canonical(ga.amount)))
            .collect();
        let bleed = if alt.bleed > 0.0 {
            format!("bleed {:.1}, ", unit.from_canonical(alt.bleed))
        } else {
            String::new()
        };
        println!(
            "{marker} [{i}] {bleed}{} -> {} at {:.1} (est. cost {:.2})",
            if additions.is_empty() {
                "nothing to add".to_string()
            } else {
                additions.join(", ")
            },
            alt.final_mix,
            unit.from_canonical(alt.final_pressure),
            alt.cost
        );
    }
    Ok(())
}

fn cmd_analyze(project_path: &Path, json: bool) -> CliResult<()> {
    let (project, resolved) = load_and_resolve(project_path)?;
    let top_gas = resolved
        .top_off
        .as_ref()
        .ok_or(CliError::MissingTopOff("analyze"))?;
    let unit = resolved.unit;

    let start_pressure = solve_required_start_pressure(&resolved.start, &resolved.target, top_gas);
    let max_he = solve_max_target_helium(&resolved.start, &resolved.target, top_gas);

    if json {
        let report = AnalyzeReport {
            meta: ReportMeta::for_project(&project),
            unit: unit.label(),
            required_start_pressure: start_pressure.as_ref().ok().map(|p| unit.from_canonical(*p)),
            required_start_pressure_error: start_pressure.as_ref().err().map(|e| e.to_string()),
            max_target_he_percent: max_he.as_ref().ok().copied(),
            max_target_he_error: max_he.as_ref().err().map(|e| e.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match start_pressure {
        Ok(p) => println!(
            "Helium-free up to a start pressure of {:.1} {}",
            unit.from_canonical(p),
            unit.label()
        ),
        Err(err) => println!("Start-pressure analysis: {err}"),
    }
    match max_he {
        Ok(he) => println!("Max target helium without buying any: {he:.2}%"),
        Err(err) => println!("Target-helium analysis: {err}"),
    }
    Ok(())
}

fn cmd_chart(project_path: &Path, step: f64, count: usize, json: bool) -> CliResult<()> {
    let (project, resolved) = load_and_resolve(project_path)?;
    let top_gas = resolved
        .top_off
        .as_ref()
        .ok_or(CliError::MissingTopOff("chart"))?;
    let unit = resolved.unit;

    let deltas: Vec<f64> = (0..count)
        .map(|i| unit.to_canonical(step) * i as f64)
        .collect();
    let rows = project_chart(&resolved.start, &resolved.target, top_gas, &deltas);

    if json {
        let report = ChartReport {
            meta: ReportMeta::for_project(&project),
            unit: unit.label(),
            rows: rows
                .iter()
                .map(|row| ChartRowReport::new(row, &top_gas.name, unit))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{:>10}  {:>10}  {:>10}  {:>10}",
        format!("start ({})", unit.label()),
        "helium",
        "oxygen",
        top_gas.name
    );
    for row in &rows {
        match &row.outcome {
            Ok(plan) => println!(
                "{:>10.1}  {:>10.1}  {:>10.1}  {:>10.1}",
                unit.from_canonical(row.start_pressure),
                unit.from_canonical(plan.added_for("Helium")),
                unit.from_canonical(plan.added_for("Oxygen")),
                unit.from_canonical(plan.added_for(&top_gas.name)),
            ),
            Err(err) => println!(
                "{:>10.1}  {err}",
                unit.from_canonical(row.start_pressure)
            ),
        }
    }
    Ok(())
}
