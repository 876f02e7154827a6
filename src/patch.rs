//! # Patch Dispatch
//!
//! A [`PatchSpec`] describes one file-level patch: a destination path inside
//! the instance, a source path inside the template directory, and a
//! [`Method`]. A [`PatchGroup`] bundles an ordered list of specs behind an
//! ordered list of conditions; the group's patches only run when every
//! condition holds for the instance.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::conditions::Condition;
use crate::error::Result;
use crate::instance::GameInstance;
use crate::merge;

/// Strategy for applying a single file patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Replace the destination with a copy of the source.
    Overwrite,
    /// Copy the source only if the destination does not exist yet.
    Insert,
    /// Replace the destination with a symlink to the source.
    Symlink,
    /// Structured merge of source into destination (same format required).
    Merge,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Overwrite => "overwrite",
            Self::Insert => "insert",
            Self::Symlink => "symlink",
            Self::Merge => "merge",
        };
        f.write_str(name)
    }
}

/// One file patch from the config. Created from config; never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct PatchSpec {
    /// Destination path, relative to the instance directory.
    pub file: String,
    /// Source path, relative to the template directory.
    #[serde(rename = "with")]
    pub with_file: String,
    /// How to apply the patch.
    pub method: Method,
}

impl PatchSpec {
    /// Resolved source path inside the template directory.
    pub fn source(&self, template_dir: &Path) -> PathBuf {
        template_dir.join(&self.with_file)
    }

    /// Resolved destination path inside the instance.
    pub fn destination(&self, instance: &GameInstance) -> PathBuf {
        instance.path.join(&self.file)
    }

    /// Apply this patch to an instance, creating destination parent
    /// directories as needed.
    pub fn apply(&self, instance: &GameInstance, template_dir: &Path) -> Result<()> {
        let from_path = self.source(template_dir);
        let to_path = self.destination(instance);

        if let Some(parent) = to_path.parent() {
            fs::create_dir_all(parent)?;
        }

        debug!(
            "applying {} -> {} ({})",
            from_path.display(),
            to_path.display(),
            self.method
        );

        match self.method {
            Method::Overwrite => overwrite(&from_path, &to_path),
            Method::Insert => insert(&from_path, &to_path),
            Method::Symlink => symlink(&from_path, &to_path),
            Method::Merge => merge::merge(&from_path, &to_path),
        }
    }
}

fn overwrite(from_path: &Path, to_path: &Path) -> Result<()> {
    if to_path.exists() {
        fs::remove_file(to_path)?;
    }
    fs::copy(from_path, to_path)?;
    Ok(())
}

fn insert(from_path: &Path, to_path: &Path) -> Result<()> {
    if to_path.exists() {
        return Ok(());
    }
    fs::copy(from_path, to_path)?;
    Ok(())
}

fn symlink(from_path: &Path, to_path: &Path) -> Result<()> {
    // symlink_metadata also catches dangling links, which exists() misses
    if to_path.symlink_metadata().is_ok() {
        fs::remove_file(to_path)?;
    }

    #[cfg(unix)]
    std::os::unix::fs::symlink(from_path, to_path)?;

    #[cfg(windows)]
    if from_path.is_dir() {
        std::os::windows::fs::symlink_dir(from_path, to_path)?;
    } else {
        std::os::windows::fs::symlink_file(from_path, to_path)?;
    }

    Ok(())
}

/// An ordered list of patches guarded by an ordered list of conditions.
#[derive(Debug, Clone)]
pub struct PatchGroup {
    pub patches: Vec<PatchSpec>,
    pub conditions: Vec<Condition>,
}

impl PatchGroup {
    pub fn new(patches: Vec<PatchSpec>, conditions: Vec<Condition>) -> Self {
        Self { patches, conditions }
    }

    /// True when every condition holds. A group without conditions applies
    /// unconditionally.
    pub fn matches(&self, instance: &GameInstance) -> Result<bool> {
        for condition in &self.conditions {
            if !condition.check(instance)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The specs that would run for this instance, without touching the
    /// filesystem.
    pub fn preview(&self, instance: &GameInstance) -> Result<&[PatchSpec]> {
        if self.matches(instance)? {
            Ok(&self.patches)
        } else {
            Ok(&[])
        }
    }
}
