//! # Merge Engine
//!
//! Merges a template source file into a destination file of the same format.
//! Each supported format has its own submodule with a codec and a shallow
//! merge: every top-level key in the source overwrites the same key in the
//! destination, destination-only keys survive, and nested mappings are
//! replaced wholesale rather than deep-merged.
//!
//! ## Supported Formats
//!
//! - JSON / JSON5 (json.rs) - comments and trailing commas tolerated on load
//! - YAML (yaml.rs)
//! - TOML (toml.rs)
//! - options.txt (options.rs) - the line-oriented key:value format
//!
//! ## Dispatch
//!
//! [`merge`] routes on the destination path through an ordered pattern table
//! with first-match-wins semantics. Table order is load-bearing: a path that
//! matches more than one pattern is routed by the earliest entry.

pub mod json;
pub mod options;
pub mod toml;
pub mod yaml;

use std::path::Path;

use glob::Pattern;

use crate::error::{Error, Result};

type MergeFn = fn(&Path, &Path) -> Result<()>;

/// Ordered table of destination patterns and their merge functions.
/// First match wins; declaration order is part of the contract.
const MERGE_TABLE: &[(&str, MergeFn)] = &[
    ("**/*.json", json::merge),
    ("**/*.json5", json::merge),
    ("**/*.yaml", yaml::merge),
    ("**/*.yml", yaml::merge),
    ("**/*.toml", toml::merge),
    ("**/options.txt", options::merge),
];

/// Merge `from_path` into `to_path`, writing the result back to `to_path`.
///
/// Fails when the two extensions differ or when the destination matches no
/// entry in the dispatch table.
pub fn merge(from_path: &Path, to_path: &Path) -> Result<()> {
    if from_path.extension() != to_path.extension() {
        return Err(Error::Merge {
            operation: "dispatch".to_string(),
            message: format!(
                "cannot merge files with different extensions: \"{}\" and \"{}\"",
                from_path.display(),
                to_path.display()
            ),
        });
    }

    let normalized = to_path.to_string_lossy().replace('\\', "/");
    for (pattern, merge_fn) in MERGE_TABLE {
        if Pattern::new(pattern)?.matches(&normalized) {
            return merge_fn(from_path, to_path);
        }
    }

    Err(Error::Merge {
        operation: "dispatch".to_string(),
        message: format!("unknown file type: \"{}\"", to_path.display()),
    })
}
