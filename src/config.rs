//! # Configuration Schema and Orchestration
//!
//! The patch configuration is a JSONC document (comments and trailing commas
//! tolerated) with a `patches` key: an ordered list of patch groups. Each
//! group carries an optional `if` (condition object or list) and an optional
//! `patch` (patch object or list):
//!
//! ```jsonc
//! {
//!   "patches": [
//!     {
//!       // only fabric instances
//!       "if": {"file": "mods/fabric*.jar"},
//!       "patch": [
//!         {"file": "config/sodium.json", "with": "sodium.json", "method": "merge"},
//!         {"file": "options.txt", "with": "options.txt", "method": "merge"},
//!       ],
//!     },
//!   ],
//! }
//! ```
//!
//! [`Config`] also orchestrates runs: [`Config::apply`] walks every instance
//! and every group in declaration order, and [`Config::preview`] collects the
//! patches that would run without mutating anything. Per-patch failures are
//! caught, logged, and recorded in the [`ApplyReport`] so one broken patch
//! does not abort the remaining instances.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};
use serde::Deserialize;
use serde_json::Value;

use crate::conditions::Condition;
use crate::error::Result;
use crate::instance::GameInstance;
use crate::patch::{Method, PatchGroup, PatchSpec};

/// A field that accepts either a single value or a list of values.
///
/// `Many` is declared first: with untagged deserialization the variants are
/// tried in order, and a catch-all like `Value` would otherwise swallow
/// arrays.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Raw config document, as deserialized from JSONC.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    patches: Vec<RawGroup>,
}

/// One raw patch group. Conditions stay raw values here; the shape-inspecting
/// factory in [`Condition::from_value`] turns them into variants.
#[derive(Debug, Deserialize)]
struct RawGroup {
    #[serde(default, rename = "if")]
    conditions: Option<OneOrMany<Value>>,
    #[serde(default)]
    patch: Option<OneOrMany<PatchSpec>>,
}

/// The loaded configuration: ordered patch groups plus the template
/// directory that `with` paths resolve against. Immutable for the run.
#[derive(Debug)]
pub struct Config {
    pub groups: Vec<PatchGroup>,
    pub template_dir: PathBuf,
}

impl Config {
    /// Load a config file from disk.
    pub fn from_file(path: &Path, template_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?, template_dir)
    }

    /// Parse config text. Condition construction errors (unknown condition
    /// types, invalid regexes) abort the load.
    pub fn parse(text: &str, template_dir: impl Into<PathBuf>) -> Result<Self> {
        let raw: RawConfig = json5::from_str(text)?;

        let mut groups = Vec::with_capacity(raw.patches.len());
        for raw_group in raw.patches {
            let patches = raw_group
                .patch
                .map(OneOrMany::into_vec)
                .unwrap_or_default();
            let conditions = raw_group
                .conditions
                .map(OneOrMany::into_vec)
                .unwrap_or_default()
                .iter()
                .map(Condition::from_value)
                .collect::<Result<Vec<_>>>()?;
            groups.push(PatchGroup::new(patches, conditions));
        }

        Ok(Self {
            groups,
            template_dir: template_dir.into(),
        })
    }

    /// Apply every matching patch group to every instance, groups in config
    /// order, patches in declaration order.
    ///
    /// Per-patch failures are logged and recorded, then processing continues
    /// with the next patch; condition evaluation errors abort the run since
    /// they indicate a broken config rather than a broken instance.
    pub fn apply(&self, instances: &[GameInstance]) -> Result<ApplyReport> {
        let mut report = ApplyReport::default();

        for instance in instances {
            for group in &self.groups {
                if !group.matches(instance)? {
                    continue;
                }
                for spec in &group.patches {
                    match spec.apply(instance, &self.template_dir) {
                        Ok(()) => {
                            debug!("applied {} to {}", spec.file, instance.path.display());
                            report.applied += 1;
                        }
                        Err(err) => {
                            error!(
                                "failed to apply {} to {}: {}",
                                spec.file,
                                instance.path.display(),
                                err
                            );
                            report.failures.push(ApplyFailure {
                                instance: instance.path.clone(),
                                file: spec.file.clone(),
                                message: err.to_string(),
                            });
                        }
                    }
                }
            }
        }

        Ok(report)
    }

    /// Collect the patches that would run, per instance, without mutating the
    /// filesystem. Instances with nothing pending are omitted.
    pub fn preview(&self, instances: &[GameInstance]) -> Result<Preview> {
        let mut entries = Vec::new();

        for instance in instances {
            let mut pending = Vec::new();
            for group in &self.groups {
                for spec in group.preview(instance)? {
                    pending.push(PendingPatch {
                        file: spec.file.clone(),
                        with_file: spec.with_file.clone(),
                        source: spec.source(&self.template_dir),
                        destination: spec.destination(instance),
                        method: spec.method,
                    });
                }
            }
            if !pending.is_empty() {
                entries.push(PreviewEntry {
                    instance: instance.path.clone(),
                    pending,
                });
            }
        }

        Ok(Preview { entries })
    }
}

/// Outcome of an apply run.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Number of patches applied successfully.
    pub applied: usize,
    /// Patches that failed, with enough context to report them.
    pub failures: Vec<ApplyFailure>,
}

impl ApplyReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One failed patch application.
#[derive(Debug)]
pub struct ApplyFailure {
    pub instance: PathBuf,
    pub file: String,
    pub message: String,
}

/// Result of a preview run: pending patches per instance.
#[derive(Debug)]
pub struct Preview {
    pub entries: Vec<PreviewEntry>,
}

impl Preview {
    /// True when at least one instance has at least one applicable patch.
    pub fn has_changes(&self) -> bool {
        self.entries.iter().any(|entry| !entry.pending.is_empty())
    }
}

/// Pending patches for one instance.
#[derive(Debug)]
pub struct PreviewEntry {
    pub instance: PathBuf,
    pub pending: Vec<PendingPatch>,
}

/// One patch that would run, with its resolved paths.
#[derive(Debug)]
pub struct PendingPatch {
    pub file: String,
    pub with_file: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub method: Method,
}
