//! In-memory YAML document with dotted-path access.
//!
//! Responsibilities:
//! - Parse raw YAML text into a mapping-rooted document.
//! - Resolve dotted key paths (`nimbus.cloud.aws.cm.active`) to values.
//! - Write values at dotted paths, creating intermediate mappings as needed.
//!
//! Does NOT handle:
//! - File I/O or persistence (see persist.rs and store.rs).
//! - `{dotted.path}` placeholder substitution (see template.rs).
//!
//! Invariants:
//! - The document root is always a mapping; parsing anything else fails.
//! - Key order from the source text is preserved through serialization.
//! - Writing through a non-mapping intermediate replaces it with a mapping;
//!   the previous value at that position is discarded.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

/// A parsed configuration document.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// Parses YAML text into a document.
    ///
    /// `file` is only used for error context. Fails with
    /// [`ConfigError::EmptyDocument`] when the text parses to null, to an
    /// empty mapping, or to anything that is not a mapping.
    pub fn parse(text: &str, file: &Path) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| ConfigError::Yaml {
            path: file.to_path_buf(),
            source: e,
        })?;
        match value {
            Value::Mapping(root) if !root.is_empty() => Ok(Self { root }),
            _ => Err(ConfigError::EmptyDocument {
                path: file.to_path_buf(),
            }),
        }
    }

    /// Looks up the value at a dotted key path.
    ///
    /// Returns None when any segment is missing or when a non-terminal
    /// segment resolves to something other than a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let Some((first, rest)) = key.split_once('.') else {
            return self.root.get(key);
        };
        let mut node = self.root.get(first)?;
        for segment in rest.split('.') {
            node = node.as_mapping()?.get(segment)?;
        }
        Some(node)
    }

    /// Mutable variant of [`Document::get`].
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let Some((first, rest)) = key.split_once('.') else {
            return self.root.get_mut(key);
        };
        let mut node = self.root.get_mut(first)?;
        for segment in rest.split('.') {
            node = node.as_mapping_mut()?.get_mut(segment)?;
        }
        Some(node)
    }

    /// Writes a value at a dotted key path.
    ///
    /// Missing intermediate mappings are created. An intermediate that holds
    /// a scalar or sequence is replaced by a fresh mapping, discarding the
    /// old value.
    pub fn set(&mut self, key: &str, value: Value) {
        let mut segments: Vec<&str> = key.split('.').collect();
        let Some(leaf) = segments.pop() else {
            return;
        };

        let mut node = &mut self.root;
        for segment in segments {
            let entry = Value::String(segment.to_string());
            if !matches!(node.get(&entry), Some(Value::Mapping(_))) {
                node.insert(entry.clone(), Value::Mapping(Mapping::new()));
            }
            node = match node.get_mut(&entry) {
                Some(Value::Mapping(child)) => child,
                _ => unreachable!("intermediate mapping inserted above"),
            };
        }
        node.insert(Value::String(leaf.to_string()), value);
    }

    /// Removes and returns the value at a dotted key path.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let Some((parent, leaf)) = key.rsplit_once('.') else {
            return self.root.remove(key);
        };
        self.get_mut(parent)?.as_mapping_mut()?.remove(leaf)
    }

    /// Returns true when the key path resolves to a value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_yaml::to_string(&self.root).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Renders a scalar value the way it appears in flow YAML.
///
/// Mappings, sequences, and nulls have no scalar rendering and yield None.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
