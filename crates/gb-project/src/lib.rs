//! gb-project: blend project files.
//!
//! A project file (YAML) carries the fill-station settings (display unit,
//! pricing, gas banks) and one blend request (start tank, target tank,
//! top-off gas, available sources). This crate owns the schema, validates
//! it, and resolves it into canonical-unit engine inputs; the solver crate
//! never parses files or sees display units.

pub mod error;
pub mod resolve;
pub mod schema;
pub mod validate;

use std::path::Path;

pub use error::{ProjectError, ProjectResult};
pub use resolve::{ResolvedRequest, resolve_project};
pub use schema::{BankDef, BlendProject, CostDef, GasDef, RequestDef, SettingsDef, TankDef, UnitDef};
pub use validate::{LATEST_VERSION, ValidationError, validate_project};

/// Load a project file from disk.
pub fn load_project(path: &Path) -> ProjectResult<BlendProject> {
    let text = std::fs::read_to_string(path).map_err(|source| ProjectError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_project(&text)
}

/// Parse a project from YAML text.
pub fn parse_project(text: &str) -> ProjectResult<BlendProject> {
    Ok(serde_yaml::from_str(text)?)
}
