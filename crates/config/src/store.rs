//! The configuration store: a YAML document plus its runtime variables.
//!
//! Responsibilities:
//! - Create the backing file from the bundled starter template on first use.
//! - Load the document (text expansion, placeholder resolution, parsing) and
//!   seed the variable store from its default section.
//! - Serve dotted-path reads and persist every write synchronously.
//! - Offer an optional process-wide shared handle.
//!
//! Does NOT handle:
//! - Command-line concerns such as exit codes or output formatting.
//!
//! Invariants:
//! - After a successful load the root key exists and is non-null.
//! - Every mutation is written to disk before the call returns.
//! - `load` always produces an independent instance; only `shared` has
//!   process-wide first-caller-wins behavior.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde_yaml::{Mapping, Value};

use crate::constants::{DEFAULT_CLOUD_KEY, DEFAULT_SECTION_KEY, ROOT_KEY};
use crate::document::{Document, scalar_to_string};
use crate::error::{Access, ConfigError};
use crate::paths::{default_config_path, expand_text, expand_tilde, variables_path_for};
use crate::persist::{write_text_atomic, write_yaml_atomic};
use crate::template::{ResolveMode, resolve_placeholders};
use crate::variables::VariableStore;

/// Starter document written when the backing file does not exist yet.
const STARTER_TEMPLATE: &str = include_str!("../etc/nimbus.yaml");

/// A loaded configuration document bound to its backing file.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    document: Document,
    variables: VariableStore,
    default_cloud: Option<String>,
}

impl ConfigStore {
    /// Ensures the backing file exists, copying the starter template if not.
    ///
    /// An existing file is never overwritten. Returns the tilde-expanded
    /// path of the file.
    pub fn create(path: &Path) -> Result<PathBuf, ConfigError> {
        let path = expand_tilde(path)?;
        if !path.exists() {
            write_text_atomic(&path, STARTER_TEMPLATE)?;
            tracing::info!(path = %path.display(), "created starter configuration");
        }
        Ok(path)
    }

    /// Loads the store at `path`, creating the file first when necessary.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_mode(path, ResolveMode::default())
    }

    /// Loads the store from the default location (`~/.nimbus/nimbus.yaml`).
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(&default_config_path()?)
    }

    /// Loads the store with an explicit placeholder resolution mode.
    pub fn load_with_mode(path: &Path, mode: ResolveMode) -> Result<Self, ConfigError> {
        let path = Self::create(path)?;

        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        let expanded = expand_text(&raw);
        let resolved = resolve_placeholders(&expanded, &path, mode)?;
        let document = Document::parse(&resolved, &path)?;

        if !matches!(document.get(ROOT_KEY), Some(value) if !value.is_null()) {
            return Err(ConfigError::KeyNotFound {
                key: ROOT_KEY.to_string(),
                path,
                origin: Access::Direct,
            });
        }

        let mut variables = VariableStore::open(&variables_path_for(&path))?;
        if let Some(defaults) = document.get(DEFAULT_SECTION_KEY).and_then(Value::as_mapping) {
            variables.seed_defaults(defaults)?;
        }
        variables.ensure_flags()?;

        let default_cloud = document
            .get(&format!("{DEFAULT_SECTION_KEY}.{DEFAULT_CLOUD_KEY}"))
            .and_then(scalar_to_string);

        tracing::debug!(path = %path.display(), "configuration loaded");

        Ok(Self {
            path,
            document,
            variables,
            default_cloud,
        })
    }

    /// Returns the process-wide shared store, loading it on first call.
    ///
    /// The path given by the first caller wins; later callers get the same
    /// handle regardless of the path they pass. Use [`ConfigStore::load`]
    /// for an independent instance.
    pub fn shared(path: &Path) -> Result<&'static Mutex<ConfigStore>, ConfigError> {
        static SHARED: OnceLock<Mutex<ConfigStore>> = OnceLock::new();
        if let Some(existing) = SHARED.get() {
            return Ok(existing);
        }
        // Concurrent first callers may both load; the first init wins.
        let store = Self::load(path)?;
        Ok(SHARED.get_or_init(|| Mutex::new(store)))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The variable store seeded from this document.
    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Mutable access to the variable store.
    pub fn variables_mut(&mut self) -> &mut VariableStore {
        &mut self.variables
    }

    /// Returns the value at a dotted key path.
    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        self.document.get(key).ok_or_else(|| self.missing(key))
    }

    /// Returns the value at a dotted key path rendered as text.
    ///
    /// Scalars render bare; mappings and sequences render as YAML.
    pub fn get_str(&self, key: &str) -> Result<String, ConfigError> {
        let value = self.get(key)?;
        match scalar_to_string(value) {
            Some(text) => Ok(text),
            None => serde_yaml::to_string(value)
                .map(|text| text.trim_end().to_string())
                .map_err(|e| ConfigError::Yaml {
                    path: self.path.clone(),
                    source: e,
                }),
        }
    }

    /// Writes a value at a dotted key path and persists the whole document.
    ///
    /// Missing intermediate mappings are created; scalar intermediates are
    /// replaced by mappings.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        self.document.set(key, value.into());
        self.persist()
    }

    /// Removes the value at a dotted key path and persists the document.
    pub fn remove(&mut self, key: &str) -> Result<Value, ConfigError> {
        let removed = self.document.remove(key).ok_or_else(|| self.missing(key))?;
        self.persist()?;
        Ok(removed)
    }

    /// Returns the credentials mapping of a registered provider entry.
    pub fn credentials(&self, kind: &str, name: &str) -> Result<&Mapping, ConfigError> {
        let key = format!("{ROOT_KEY}.{kind}.{name}.credentials");
        self.get(&key)?
            .as_mapping()
            .ok_or_else(|| self.missing(&key))
    }

    /// Returns the document's default section.
    pub fn default_section(&self) -> Result<&Mapping, ConfigError> {
        self.get(DEFAULT_SECTION_KEY)?
            .as_mapping()
            .ok_or_else(|| self.missing(DEFAULT_SECTION_KEY))
    }

    /// The default cloud captured at load time, if the document names one.
    pub fn default_cloud(&self) -> Option<&str> {
        self.default_cloud.as_deref()
    }

    /// Names of the entries under `nimbus.<kind>` whose `cm.active` is true.
    pub fn active(&self, kind: &str) -> Result<Vec<String>, ConfigError> {
        let key = format!("{ROOT_KEY}.{kind}");
        let section = self
            .get(&key)?
            .as_mapping()
            .ok_or_else(|| self.missing(&key))?;

        let mut names = Vec::new();
        for (name, entry) in section {
            let is_active = entry
                .as_mapping()
                .and_then(|entry| entry.get("cm"))
                .and_then(Value::as_mapping)
                .and_then(|cm| cm.get("active"))
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if is_active
                && let Some(name) = name.as_str()
            {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn missing(&self, key: &str) -> ConfigError {
        ConfigError::KeyNotFound {
            key: key.to_string(),
            path: self.path.clone(),
            origin: Access::Direct,
        }
    }

    fn persist(&self) -> Result<(), ConfigError> {
        write_yaml_atomic(&self.path, &self.document)
    }
}

impl fmt::Display for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.document.fmt(f)
    }
}
