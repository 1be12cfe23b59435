//! Runtime variable store seeded from the document's default section.
//!
//! Responsibilities:
//! - Hold flat name/value string pairs in a YAML file beside the document.
//! - Copy document defaults in on load, without overwriting user values.
//! - Guarantee the `trace` and `debug` flags exist after a load.
//!
//! Does NOT handle:
//! - Writing anything back into the configuration document. The flow is
//!   one-directional: document defaults seed variables, never the reverse.
//!
//! Invariants:
//! - The file is created lazily, on the first write.
//! - Values already present in the store are never overwritten by seeding.
//! - Every mutation persists synchronously.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::constants::{FLAG_DEFAULT, GUARANTEED_VARIABLES};
use crate::document::scalar_to_string;
use crate::error::ConfigError;
use crate::persist::write_yaml_atomic;

/// Flat string-to-string variable store persisted as YAML.
#[derive(Debug, Clone)]
pub struct VariableStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl VariableStore {
    /// Opens the store at `path`, reading existing values if the file exists.
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        let values = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Yaml {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Sets a variable and persists the store.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        self.values.insert(name.to_string(), value.to_string());
        self.save()
    }

    /// Removes a variable and persists the store. Returns the old value.
    pub fn remove(&mut self, name: &str) -> Result<Option<String>, ConfigError> {
        let removed = self.values.remove(name);
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copies document defaults in, keeping any value already in the store.
    ///
    /// Non-scalar defaults are stored in their YAML rendering.
    pub(crate) fn seed_defaults(&mut self, defaults: &Mapping) -> Result<(), ConfigError> {
        let mut changed = false;
        for (key, value) in defaults {
            let Some(name) = scalar_to_string(key) else {
                continue;
            };
            if self.values.contains_key(&name) {
                continue;
            }
            let rendered = match scalar_to_string(value) {
                Some(text) => text,
                None => yaml_rendering(value, &self.path)?,
            };
            self.values.insert(name, rendered);
            changed = true;
        }
        if changed {
            self.save()?;
        }
        Ok(())
    }

    /// Guarantees the trace/debug flags exist, defaulting them to "false".
    pub(crate) fn ensure_flags(&mut self) -> Result<(), ConfigError> {
        let mut changed = false;
        for flag in GUARANTEED_VARIABLES {
            if !self.values.contains_key(*flag) {
                self.values.insert((*flag).to_string(), FLAG_DEFAULT.to_string());
                changed = true;
            }
        }
        if changed {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<(), ConfigError> {
        write_yaml_atomic(&self.path, &self.values)
    }
}

fn yaml_rendering(value: &Value, path: &Path) -> Result<String, ConfigError> {
    let text = serde_yaml::to_string(value).map_err(|e| ConfigError::Yaml {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(text.trim_end().to_string())
}
