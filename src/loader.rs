//! Specification loader: YAML on disk to an ordered `case → entries` mapping.
//!
//! Only the document shape is checked here (the root must be a mapping).
//! Everything below the root is left to the validator.

use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::JobSpecError;

/// Read and parse a job specification file.
pub fn load_cases(path: &Path) -> Result<Mapping, JobSpecError> {
    let text = std::fs::read_to_string(path).map_err(|e| JobSpecError::io(path, e))?;
    let value: Value = serde_yaml::from_str(&text).map_err(|source| JobSpecError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let cases = into_mapping(value)?;
    debug!(path = %path.display(), cases = cases.len(), "loaded job specification");
    Ok(cases)
}

/// Parse a job specification held in memory.
pub fn parse_cases(yaml: &str) -> Result<Mapping, JobSpecError> {
    let value: Value = serde_yaml::from_str(yaml).map_err(|source| JobSpecError::Parse {
        path: "<string>".into(),
        source,
    })?;
    into_mapping(value)
}

fn into_mapping(value: Value) -> Result<Mapping, JobSpecError> {
    match value {
        Value::Mapping(m) => Ok(m),
        _ => Err(JobSpecError::NotAMapping),
    }
}
