//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `instance-patcher` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the application to simplify function signatures and ensure
//!   type safety.
//!
//! The `Error` enum covers:
//!
//! - Configuration parsing errors.
//! - Merge operation errors (extension mismatch, unrecognized format,
//!   non-mapping documents).
//! - Options file parsing errors.
//! - Feature not implemented (unknown condition shapes).
//! - I/O errors.
//! - JSON / JSON5 / YAML / TOML parsing and serialization errors.
//! - Regex errors.
//! - Glob pattern errors.

use thiserror::Error;

/// Main error type for instance-patcher operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the patch configuration file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An error occurred during a merge operation.
    #[error("Merge operation error: {operation} - {message}")]
    Merge { operation: String, message: String },

    /// An error occurred while parsing an options file.
    #[error("Options parsing error: {message}")]
    Options { message: String },

    /// An error for a feature that has not yet been implemented.
    #[error("Feature not implemented: {feature}")]
    NotImplemented { feature: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON5 parsing error, wrapped from `json5::Error`.
    #[error("JSON5 parsing error: {0}")]
    Json5(#[from] json5::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A TOML parsing error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A TOML serialization error, wrapped from `toml::ser::Error`.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
