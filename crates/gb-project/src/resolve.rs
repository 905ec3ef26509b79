//! Resolution of a validated project into canonical engine inputs.
//!
//! This is the unit boundary: display-unit pressures become canonical PSI
//! exactly once, and every gas reference becomes a plain `GasSource`.

use crate::error::ProjectResult;
use crate::schema::{BlendProject, GasDef, TankDef, UnitDef};
use crate::validate::validate_project;
use gb_core::units::PressureUnit;
use gb_mix::{BankGas, GasComposition, GasSelector, GasSource, Preset, TankState};
use gb_solver::CostSettings;

/// Engine-ready inputs resolved from a project file.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub unit: PressureUnit,
    pub start: TankState,
    pub target: TankState,
    pub top_off: Option<GasSource>,
    pub sources: Vec<GasSource>,
    pub cost: CostSettings,
    pub max_alternatives: usize,
}

impl UnitDef {
    pub fn to_unit(self) -> PressureUnit {
        match self {
            UnitDef::Psi => PressureUnit::Psi,
            UnitDef::Bar => PressureUnit::Bar,
        }
    }
}

impl GasDef {
    fn to_selector(&self) -> ProjectResult<GasSelector> {
        Ok(match self {
            GasDef::Air => GasSelector::Preset(Preset::Air),
            GasDef::Oxygen => GasSelector::Preset(Preset::Oxygen),
            GasDef::Helium => GasSelector::Preset(Preset::Helium),
            GasDef::Bank { id } => GasSelector::Bank(id.clone()),
            GasDef::Custom { o2, he, name } => GasSelector::Custom {
                name: name.clone(),
                composition: GasComposition::new(*o2, *he)?,
            },
        })
    }
}

fn resolve_tank(tank: &TankDef, unit: PressureUnit) -> ProjectResult<TankState> {
    Ok(TankState::new(
        unit.to_canonical(tank.pressure),
        GasComposition::new(tank.o2, tank.he)?,
    ))
}

/// Validate and resolve a project into engine inputs.
pub fn resolve_project(project: &BlendProject) -> ProjectResult<ResolvedRequest> {
    validate_project(project)?;

    let unit = project.settings.unit.to_unit();

    let banks: Vec<BankGas> = project
        .settings
        .banks
        .iter()
        .map(|b| {
            Ok(BankGas {
                id: b.id.clone(),
                name: b.name.clone().unwrap_or_else(|| b.id.clone()),
                composition: GasComposition::new(b.o2, b.he)?,
            })
        })
        .collect::<ProjectResult<_>>()?;

    let resolve_gas = |def: &GasDef| -> ProjectResult<GasSource> {
        Ok(def.to_selector()?.resolve(&banks)?)
    };

    let top_off = project
        .request
        .top_off
        .as_ref()
        .map(&resolve_gas)
        .transpose()?;
    let sources = project
        .request
        .sources
        .iter()
        .map(&resolve_gas)
        .collect::<ProjectResult<Vec<_>>>()?;

    let cost_def = &project.settings.cost;
    let cost = CostSettings {
        price_per_cuft_o2: cost_def.price_per_cuft_o2,
        price_per_cuft_he: cost_def.price_per_cuft_he,
        tank_volume_cuft: cost_def.tank_volume_cuft,
        tank_rated_pressure: unit.to_canonical(cost_def.tank_rated_pressure),
    };

    Ok(ResolvedRequest {
        unit,
        start: resolve_tank(&project.request.start, unit)?,
        target: resolve_tank(&project.request.target, unit)?,
        top_off,
        sources,
        cost,
        max_alternatives: project.settings.max_alternatives,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_project;

    #[test]
    fn resolves_bar_pressures_to_psi() {
        let yaml = r#"
version: 1
settings:
  unit: bar
request:
  start: { pressure: 0, o2: 21 }
  target: { pressure: 200, o2: 32 }
  top_off: { type: air }
"#;
        let resolved = resolve_project(&parse_project(yaml).unwrap()).unwrap();
        assert_eq!(resolved.unit, PressureUnit::Bar);
        // 200 bar = 2900.75 psi
        assert!((resolved.target.pressure - 2900.75).abs() < 0.1);
        // The default rated pressure is in display units too.
        assert!((resolved.cost.tank_rated_pressure - PressureUnit::Bar.to_canonical(3000.0)).abs() < 0.1);
    }

    #[test]
    fn resolves_banks_and_customs() {
        let yaml = r#"
version: 1
settings:
  banks:
    - { id: tmx, name: Trimix Bank, o2: 21, he: 35 }
request:
  start: { pressure: 500, o2: 21 }
  target: { pressure: 3000, o2: 28 }
  sources:
    - { type: bank, id: tmx }
    - { type: custom, o2: 50, name: EAN50 }
    - { type: custom, o2: 18, he: 45 }
"#;
        let resolved = resolve_project(&parse_project(yaml).unwrap()).unwrap();
        assert_eq!(resolved.sources.len(), 3);
        assert_eq!(resolved.sources[0].name, "Trimix Bank");
        assert_eq!(resolved.sources[1].name, "EAN50");
        // Anonymous customs get a generated name.
        assert_eq!(resolved.sources[2].name, "18.0/45.0");
    }

    #[test]
    fn invalid_project_does_not_resolve() {
        let yaml = r#"
version: 1
request:
  start: { pressure: 500, o2: 21 }
  target: { pressure: 0, o2: 32 }
  top_off: { type: air }
"#;
        assert!(resolve_project(&parse_project(yaml).unwrap()).is_err());
    }
}
