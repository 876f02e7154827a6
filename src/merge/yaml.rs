//! YAML merge operations

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Parse YAML text into a top-level mapping.
pub fn load(text: &str) -> Result<Mapping> {
    let value: Value = serde_yaml::from_str(text)?;
    match value {
        Value::Mapping(map) => Ok(map),
        other => Err(Error::Merge {
            operation: "yaml merge".to_string(),
            message: format!("expected a top-level mapping, got: {:?}", other),
        }),
    }
}

/// Serialize a mapping as YAML.
pub fn dump(map: &Mapping) -> Result<String> {
    Ok(serde_yaml::to_string(map)?)
}

/// Shallow-merge `from_path` into `to_path`.
pub fn merge(from_path: &Path, to_path: &Path) -> Result<()> {
    let from_map = load(&fs::read_to_string(from_path)?)?;
    let mut to_map = load(&fs::read_to_string(to_path)?)?;

    for (key, value) in from_map {
        to_map.insert(key, value);
    }

    fs::write(to_path, dump(&to_map)?)?;
    Ok(())
}
