//! # Instance Patcher Library
//!
//! This library provides the core functionality for pushing configuration
//! patches into game instance directories. It is designed to be used by the
//! `instance-patcher` command-line tool but can also be integrated into other
//! applications that maintain fleets of game installations.
//!
//! ## Quick Example
//!
//! ```no_run
//! use std::path::Path;
//! use instance_patcher::config::Config;
//! use instance_patcher::instance::GameInstance;
//!
//! let instances = GameInstance::from_path(Path::new("instances"), &[], 2)?;
//! let config = Config::from_file(Path::new("configs/config.jsonc"), "configs/")?;
//!
//! let preview = config.preview(&instances)?;
//! if preview.has_changes() {
//!     let report = config.apply(&instances)?;
//!     println!("applied {} patch(es)", report.applied);
//! }
//! # Ok::<(), instance_patcher::error::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Instances (`instance`)**: discovered game installation directories,
//!   recognized by their `saves` or `mods` subfolders.
//! - **Conditions (`conditions`)**: predicates gating whether a patch group
//!   applies to an instance, built from the config's `if` entries.
//! - **Patches (`patch`)**: one file operation each - overwrite, insert,
//!   symlink, or merge - resolved against a template directory.
//! - **Merge engine (`merge`)**: format-aware shallow merges for JSON, YAML,
//!   TOML, and the options.txt format.
//! - **Options codec (`options`)**: the line-oriented `key:value` format with
//!   its version-gated key-code translation table.
//! - **Configuration (`config`)**: the JSONC schema tying it all together and
//!   the apply/preview orchestration.
//!
//! ## Execution Flow
//!
//! 1. Discover instances under the given root directories.
//! 2. Load the config once; build patch groups and conditions.
//! 3. Preview: per instance, collect the patches whose group conditions hold.
//! 4. Apply: run those patches in declaration order, catching and recording
//!    per-patch failures so unrelated instances still get processed.

pub mod conditions;
pub mod config;
pub mod error;
pub mod instance;
pub mod merge;
pub mod options;
pub mod patch;
