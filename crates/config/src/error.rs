//! Error types for the configuration store.
//!
//! Responsibilities:
//! - Define error variants for loading, lookup, resolution, and persistence failures.
//! - Record enough context (key, file path, access origin) that callers can report
//!   a failure without re-deriving where it happened.
//!
//! Does NOT handle:
//! - Process exit codes (the CLI maps errors to exit codes).
//! - Retry or recovery policy.
//!
//! Invariants:
//! - Every lookup failure carries the dotted key and the backing file path.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// How a key lookup was reached when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The caller asked for the key directly.
    Direct,
    /// The key appeared inside a `{dotted.path}` placeholder during load.
    Template,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Direct => f.write_str("direct access"),
            Access::Template => f.write_str("template resolution"),
        }
    }
}

/// Errors that can occur while loading or operating on a configuration store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but parsed to nothing usable (null or an empty mapping).
    #[error("configuration file {path} exists but holds no document")]
    EmptyDocument { path: PathBuf },

    /// A dotted key did not resolve to a value.
    #[error("key '{key}' could not be found in configuration file {path} ({origin})")]
    KeyNotFound {
        key: String,
        path: PathBuf,
        origin: Access,
    },

    /// Fixpoint resolution stabilized with placeholders still in the text.
    #[error("unresolved placeholders remain in {path}: {}", tokens.join(", "))]
    UnresolvedPlaceholders { tokens: Vec<String>, path: PathBuf },

    /// The user's home directory could not be determined.
    #[error("unable to determine the home directory")]
    HomeDirUnavailable,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
