//! TOML merge operations

use std::fs;
use std::path::Path;

use toml::Table;

use crate::error::Result;

/// Parse TOML text into its top-level table.
pub fn load(text: &str) -> Result<Table> {
    Ok(text.parse::<Table>()?)
}

/// Serialize a table as TOML.
pub fn dump(table: &Table) -> Result<String> {
    Ok(::toml::to_string(table)?)
}

/// Shallow-merge `from_path` into `to_path`.
pub fn merge(from_path: &Path, to_path: &Path) -> Result<()> {
    let from_table = load(&fs::read_to_string(from_path)?)?;
    let mut to_table = load(&fs::read_to_string(to_path)?)?;

    for (key, value) in from_table {
        to_table.insert(key, value);
    }

    fs::write(to_path, dump(&to_table)?)?;
    Ok(())
}
