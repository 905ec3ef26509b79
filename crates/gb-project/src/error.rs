//! Project file errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Failed to read project file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse project file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Project validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Mix error: {0}")]
    Mix(#[from] gb_mix::MixError),
}

pub type ProjectResult<T> = Result<T, ProjectError>;
