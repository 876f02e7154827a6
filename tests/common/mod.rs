//! Shared test utilities for integration tests.
//!
//! Helpers for building instance directory trees and template directories
//! inside a temporary directory, so tests can exercise discovery, conditions,
//! and patch application against a realistic layout.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Create an instance directory containing a `mods` subfolder with the given
/// mod files. Returns the instance path.
pub fn make_instance(root: &Path, name: &str, mods: &[&str]) -> PathBuf {
    let instance = root.join(name);
    fs::create_dir_all(instance.join("mods")).expect("create mods dir");
    for mod_name in mods {
        fs::write(instance.join("mods").join(mod_name), "").expect("write mod file");
    }
    instance
}

/// Write a file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write file");
}
