//! Atomic YAML persistence for the document and the variable store.
//!
//! Responsibilities:
//! - Serialize a value to YAML and write it to disk atomically
//!   (temporary file followed by a rename).
//! - Create the parent directory on first write.
//!
//! Does NOT handle:
//! - Deciding when to persist (callers write after every mutation).
//!
//! Invariants:
//! - A reader never observes a half-written file.
//! - No `.tmp` file is left behind after a successful write.

use std::path::Path;

use serde::Serialize;

use crate::error::ConfigError;

/// Serializes `value` as YAML and writes it to `path` atomically.
pub(crate) fn write_yaml_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let content = serde_yaml::to_string(value).map_err(|e| ConfigError::Yaml {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_text_atomic(path, &content)
}

/// Writes raw text to `path` atomically.
pub(crate) fn write_text_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Write to a temporary file first, then atomically rename it into place
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, content).map_err(|e| ConfigError::Io {
        path: temp_path.clone(),
        source: e,
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "file saved atomically");

    Ok(())
}
