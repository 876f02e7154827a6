//! # Instance Discovery
//!
//! A [`GameInstance`] is one discovered game installation directory. Discovery
//! walks a root directory looking for folders that contain a `saves` or `mods`
//! subfolder (fresh installations may have only one of the two). A folder that
//! qualifies is returned as-is and never descended into, so discovery yields
//! the shallowest qualifying directories within the recursion limit.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;

/// One discovered game installation directory. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInstance {
    /// Path of the installation directory, as discovered.
    pub path: PathBuf,
}

impl GameInstance {
    /// Wrap an existing directory as an instance.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The instance path with separators normalized to forward slashes,
    /// as matched by path-pattern conditions.
    pub fn normalized_path(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }

    /// Recursively discover instances under `path`.
    ///
    /// Directories named in `ignore` are skipped entirely. A directory
    /// containing a `saves` or `mods` subfolder qualifies immediately;
    /// otherwise its subfolders are searched until `max_recursion` is
    /// exhausted. Entries are visited in file-name order so results are
    /// deterministic across platforms.
    pub fn from_path(path: &Path, ignore: &[String], max_recursion: u32) -> Result<Vec<Self>> {
        let mut instances = Vec::new();

        // reached the maximum recursion depth
        if max_recursion == 0 {
            return Ok(instances);
        }

        let mut entries: Vec<_> = fs::read_dir(path)?.collect::<std::io::Result<_>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let wd = entry.path();
            // ignore files
            if !wd.is_dir() {
                continue;
            }

            if ignore.iter().any(|name| entry.file_name().to_string_lossy() == *name) {
                continue;
            }

            if wd.join("saves").is_dir() || wd.join("mods").is_dir() {
                debug!("discovered instance: {}", wd.display());
                instances.push(Self::new(wd));
            } else {
                instances.extend(Self::from_path(&wd, ignore, max_recursion - 1)?);
            }
        }

        Ok(instances)
    }
}
