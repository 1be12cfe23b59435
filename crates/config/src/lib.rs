//! Configuration store for the nimbus multi-cloud tooling.
//!
//! This crate owns the `~/.nimbus/nimbus.yaml` document: creating it from a
//! starter template, loading it with environment and placeholder expansion,
//! serving dotted-path reads and writes, and seeding the runtime variable
//! store kept beside it.

pub mod constants;
mod document;
mod env;
mod error;
mod paths;
mod persist;
mod store;
mod template;
mod variables;

pub use document::{Document, scalar_to_string};
pub use env::{env_var_or_none, load_dotenv};
pub use error::{Access, ConfigError};
pub use paths::{default_config_path, expand_text, expand_tilde, home_dir, variables_path_for};
pub use store::ConfigStore;
pub use template::{ResolveMode, placeholders, resolve_placeholders};
pub use variables::VariableStore;

// The document value type callers read and write.
pub use serde_yaml::{Mapping, Value};
