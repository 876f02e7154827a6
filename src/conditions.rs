//! # Condition Evaluation
//!
//! Conditions gate whether a patch group applies to a given instance. Two
//! variants exist:
//!
//! - [`FileCondition`]: glob patterns checked for existence relative to the
//!   instance directory. Multiple patterns form a logical OR of per-pattern
//!   existence checks, each compared against the same `exists` flag.
//! - [`PatternCondition`]: a regex matched against the start of the instance's
//!   normalized path.
//!
//! Conditions are built from raw config values by [`Condition::from_value`],
//! which selects the variant from the shape of the object (a `file` key vs an
//! `instance_pattern` key). A group's conditions are ANDed by the caller; a
//! group without conditions applies unconditionally.

use std::path::Path;

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::instance::GameInstance;

/// A predicate over an instance directory.
#[derive(Debug, Clone)]
pub enum Condition {
    /// Existence of files matching glob patterns inside the instance.
    File(FileCondition),
    /// Regex prefix match against the instance path.
    Pattern(PatternCondition),
}

impl Condition {
    /// Build a condition from a raw config object, inspecting its shape.
    ///
    /// Objects with a `file` key (string or list of strings, optional `exists`
    /// flag) become a [`FileCondition`]; objects with an `instance_pattern`
    /// key become a [`PatternCondition`]. Anything else is an unknown
    /// condition type and fails config loading.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| Error::ConfigParse {
            message: format!("condition must be an object, got: {}", value),
            hint: None,
        })?;

        if let Some(file) = object.get("file") {
            let patterns = string_or_list(file).ok_or_else(|| Error::ConfigParse {
                message: format!("'file' must be a string or list of strings, got: {}", file),
                hint: None,
            })?;
            let exists = match object.get("exists") {
                None => true,
                Some(flag) => flag.as_bool().ok_or_else(|| Error::ConfigParse {
                    message: format!("'exists' must be a boolean, got: {}", flag),
                    hint: None,
                })?,
            };
            return Ok(Self::File(FileCondition::new(patterns, exists)));
        }

        if let Some(pattern) = object.get("instance_pattern") {
            let pattern = pattern.as_str().ok_or_else(|| Error::ConfigParse {
                message: format!("'instance_pattern' must be a string, got: {}", pattern),
                hint: None,
            })?;
            return Ok(Self::Pattern(PatternCondition::new(pattern)?));
        }

        Err(Error::NotImplemented {
            feature: format!("condition type: {}", value),
        })
    }

    /// Evaluate the condition against an instance.
    pub fn check(&self, instance: &GameInstance) -> Result<bool> {
        match self {
            Self::File(condition) => condition.check(instance),
            Self::Pattern(condition) => Ok(condition.check(instance)),
        }
    }
}

fn string_or_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}

/// Checks whether files matching glob patterns exist inside the instance.
#[derive(Debug, Clone)]
pub struct FileCondition {
    patterns: Vec<String>,
    exists: bool,
}

impl FileCondition {
    pub fn new(patterns: Vec<String>, exists: bool) -> Self {
        Self { patterns, exists }
    }

    fn check_pattern(base: &Path, pattern: &str, exists: bool) -> Result<bool> {
        // escape the base path so metacharacters in instance directory names
        // (e.g. "pack [1]") match literally; only `pattern` is glob syntax
        let base = glob::Pattern::escape(&base.to_string_lossy());
        let mut matches = glob::glob(&format!("{}/{}", base, pattern))?;
        let found = matches.any(|entry| entry.is_ok());
        Ok(found == exists)
    }

    /// True if ANY pattern's existence state equals the expected flag.
    pub fn check(&self, instance: &GameInstance) -> Result<bool> {
        for pattern in &self.patterns {
            if Self::check_pattern(&instance.path, pattern, self.exists)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Matches the instance's normalized path against a regex prefix.
#[derive(Debug, Clone)]
pub struct PatternCondition {
    pattern: Regex,
}

impl PatternCondition {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// True if the regex matches at the start of the normalized path. This is
    /// a prefix match, not a full match: `root/instance` matches
    /// `root/instance1` too unless the pattern is anchored further.
    pub fn check(&self, instance: &GameInstance) -> bool {
        let path = instance.normalized_path();
        self.pattern
            .find(&path)
            .is_some_and(|found| found.start() == 0)
    }
}
