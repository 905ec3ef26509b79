//! Project schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlendProject {
    pub version: u32,
    #[serde(default)]
    pub settings: SettingsDef,
    pub request: RequestDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsDef {
    #[serde(default)]
    pub unit: UnitDef,
    #[serde(default)]
    pub cost: CostDef,
    #[serde(default)]
    pub banks: Vec<BankDef>,
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,
}

impl Default for SettingsDef {
    fn default() -> Self {
        Self {
            unit: UnitDef::default(),
            cost: CostDef::default(),
            banks: Vec::new(),
            max_alternatives: default_max_alternatives(),
        }
    }
}

fn default_max_alternatives() -> usize {
    gb_solver::DEFAULT_MAX_ALTERNATIVES
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitDef {
    #[default]
    Psi,
    Bar,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostDef {
    #[serde(default)]
    pub price_per_cuft_o2: f64,
    #[serde(default)]
    pub price_per_cuft_he: f64,
    #[serde(default = "default_tank_volume")]
    pub tank_volume_cuft: f64,
    /// In the project's display unit; converted on resolve.
    #[serde(default = "default_tank_rated_pressure")]
    pub tank_rated_pressure: f64,
}

impl Default for CostDef {
    fn default() -> Self {
        Self {
            price_per_cuft_o2: 0.0,
            price_per_cuft_he: 0.0,
            tank_volume_cuft: default_tank_volume(),
            tank_rated_pressure: default_tank_rated_pressure(),
        }
    }
}

fn default_tank_volume() -> f64 {
    80.0
}

fn default_tank_rated_pressure() -> f64 {
    3000.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankDef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub o2: f64,
    #[serde(default)]
    pub he: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestDef {
    pub start: TankDef,
    pub target: TankDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_off: Option<GasDef>,
    #[serde(default)]
    pub sources: Vec<GasDef>,
}

/// A tank condition in display units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TankDef {
    pub pressure: f64,
    pub o2: f64,
    #[serde(default)]
    pub he: f64,
}

/// How the file names a gas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GasDef {
    Air,
    Oxygen,
    Helium,
    Bank {
        id: String,
    },
    Custom {
        o2: f64,
        #[serde(default)]
        he: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_project_parses() {
        let yaml = r#"
version: 1
request:
  start: { pressure: 500, o2: 32 }
  target: { pressure: 3000, o2: 32 }
  top_off: { type: air }
"#;
        let project: BlendProject = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(project.version, 1);
        assert_eq!(project.settings.unit, UnitDef::Psi);
        assert_eq!(project.settings.max_alternatives, 5);
        assert_eq!(project.request.start.he, 0.0);
        assert_eq!(project.request.top_off, Some(GasDef::Air));
    }

    #[test]
    fn full_settings_parse() {
        let yaml = r#"
version: 1
settings:
  unit: bar
  cost:
    price_per_cuft_o2: 0.5
    price_per_cuft_he: 2.5
  banks:
    - { id: tmx-bank, name: Trimix Bank, o2: 21, he: 35 }
request:
  start: { pressure: 30, o2: 21, he: 35 }
  target: { pressure: 200, o2: 21, he: 35 }
  sources:
    - { type: air }
    - { type: oxygen }
    - { type: bank, id: tmx-bank }
    - { type: custom, o2: 50, name: EAN50 }
"#;
        let project: BlendProject = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(project.settings.unit, UnitDef::Bar);
        assert_eq!(project.settings.banks.len(), 1);
        assert_eq!(project.request.sources.len(), 4);
        // Defaults survive partial cost settings.
        assert_eq!(project.settings.cost.tank_volume_cuft, 80.0);
    }
}
