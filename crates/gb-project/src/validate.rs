//! Project validation logic.

use crate::schema::{BlendProject, GasDef, TankDef};
use gb_mix::GasComposition;
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &BlendProject) -> Result<(), ValidationError> {
    if project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut bank_ids = HashSet::new();
    for bank in &project.settings.banks {
        if !bank_ids.insert(bank.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: bank.id.clone(),
                context: "banks".to_string(),
            });
        }
        validate_mix("bank", bank.o2, bank.he)?;
    }

    let cost = &project.settings.cost;
    if cost.tank_volume_cuft <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "cost.tank_volume_cuft".to_string(),
            value: cost.tank_volume_cuft.to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if cost.tank_rated_pressure <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "cost.tank_rated_pressure".to_string(),
            value: cost.tank_rated_pressure.to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if project.settings.max_alternatives == 0 {
        return Err(ValidationError::InvalidValue {
            field: "max_alternatives".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    validate_tank("request.start", &project.request.start, false)?;
    validate_tank("request.target", &project.request.target, true)?;

    if project.request.top_off.is_none() && project.request.sources.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "request".to_string(),
            value: "empty".to_string(),
            reason: "needs a top-off gas or at least one source".to_string(),
        });
    }

    let gases = project
        .request
        .top_off
        .iter()
        .chain(project.request.sources.iter());
    for gas in gases {
        match gas {
            GasDef::Bank { id } => {
                if !bank_ids.contains(id.as_str()) {
                    return Err(ValidationError::MissingReference {
                        id: id.clone(),
                        context: "request gas bank".to_string(),
                    });
                }
            }
            GasDef::Custom { o2, he, .. } => validate_mix("custom gas", *o2, *he)?,
            GasDef::Air | GasDef::Oxygen | GasDef::Helium => {}
        }
    }

    Ok(())
}

fn validate_tank(field: &str, tank: &TankDef, require_positive: bool) -> Result<(), ValidationError> {
    if !tank.pressure.is_finite() || tank.pressure < 0.0 || (require_positive && tank.pressure == 0.0)
    {
        return Err(ValidationError::InvalidValue {
            field: format!("{field}.pressure"),
            value: tank.pressure.to_string(),
            reason: if require_positive {
                "must be positive".to_string()
            } else {
                "must be non-negative".to_string()
            },
        });
    }
    validate_mix(field, tank.o2, tank.he)
}

fn validate_mix(field: &str, o2: f64, he: f64) -> Result<(), ValidationError> {
    GasComposition::new(o2, he)
        .map(|_| ())
        .map_err(|err| ValidationError::InvalidValue {
            field: format!("{field} mix"),
            value: format!("{o2}/{he}"),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_project;

    fn base_yaml() -> &'static str {
        r#"
version: 1
settings:
  banks:
    - { id: tmx, o2: 21, he: 35 }
request:
  start: { pressure: 500, o2: 21 }
  target: { pressure: 3000, o2: 32 }
  sources:
    - { type: air }
    - { type: bank, id: tmx }
"#
    }

    #[test]
    fn valid_project_passes() {
        let project = parse_project(base_yaml()).unwrap();
        validate_project(&project).unwrap();
    }

    #[test]
    fn future_version_rejected() {
        let mut project = parse_project(base_yaml()).unwrap();
        project.version = 99;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }

    #[test]
    fn duplicate_bank_ids_rejected() {
        let mut project = parse_project(base_yaml()).unwrap();
        let dup = project.settings.banks[0].clone();
        project.settings.banks.push(dup);
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn unknown_bank_reference_rejected() {
        let mut project = parse_project(base_yaml()).unwrap();
        project.request.sources.push(crate::schema::GasDef::Bank {
            id: "missing".to_string(),
        });
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn over_rich_mix_rejected() {
        let mut project = parse_project(base_yaml()).unwrap();
        project.request.target.o2 = 60.0;
        project.request.target.he = 40.0001;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn zero_target_pressure_rejected() {
        let mut project = parse_project(base_yaml()).unwrap();
        project.request.target.pressure = 0.0;
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn request_without_gases_rejected() {
        let mut project = parse_project(base_yaml()).unwrap();
        project.request.sources.clear();
        assert!(validate_project(&project).is_err());
    }
}
