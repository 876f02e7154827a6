//! JSON merge operations
//!
//! Loads both sides through a JSON5 parser, so destination files with
//! comments or trailing commas still merge. Output is plain pretty-printed
//! JSON; a merge therefore normalizes a commented file.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Parse JSON/JSON5 text into an ordered top-level mapping.
///
/// Strict JSON is tried first to keep full number fidelity; files that fail
/// it (comments, trailing commas) go through the JSON5 parser.
pub fn load(text: &str) -> Result<Map<String, Value>> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => json5::from_str(text)?,
    };
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::Merge {
            operation: "json merge".to_string(),
            message: format!("expected a top-level object, got: {}", other),
        }),
    }
}

/// Serialize a mapping as pretty-printed JSON.
pub fn dump(map: &Map<String, Value>) -> Result<String> {
    let mut text = serde_json::to_string_pretty(map)?;
    text.push('\n');
    Ok(text)
}

/// Shallow-merge `from_path` into `to_path`.
pub fn merge(from_path: &Path, to_path: &Path) -> Result<()> {
    let from_map = load(&fs::read_to_string(from_path)?)?;
    let mut to_map = load(&fs::read_to_string(to_path)?)?;

    to_map.extend(from_map);

    fs::write(to_path, dump(&to_map)?)?;
    Ok(())
}
