//! Configuration read/write commands.
//!
//! Responsibilities:
//! - Read values by dotted path (`config get`).
//! - Write values by dotted path and persist (`config set`).
//! - Report the resolved backing file location (`config path`).
//!
//! Does NOT handle:
//! - Path resolution from flags and environment (see `args`).

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use nimbus_config::{ConfigStore, Value};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the value stored at a dotted path
    Get {
        /// Dotted path, e.g. nimbus.default.cloud
        key: String,
    },

    /// Set the value at a dotted path and persist the file
    Set {
        /// Dotted path, e.g. nimbus.default.cloud
        key: String,

        /// Value to store (booleans and numbers are stored typed)
        value: String,
    },

    /// Print the resolved backing file path
    Path,
}

/// Entry point for `nimbus config` subcommands.
pub fn run(command: ConfigCommand, config_path: &Path) -> Result<()> {
    match command {
        ConfigCommand::Get { key } => run_get(&key, config_path),
        ConfigCommand::Set { key, value } => run_set(&key, &value, config_path),
        ConfigCommand::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

fn run_get(key: &str, config_path: &Path) -> Result<()> {
    let store = ConfigStore::load(config_path)?;
    println!("{}", store.get_str(key)?);
    Ok(())
}

fn run_set(key: &str, value: &str, config_path: &Path) -> Result<()> {
    let mut store = ConfigStore::load(config_path)?;
    store.set(key, parse_scalar(value))?;
    tracing::debug!(key, "configuration value updated");
    println!("{}={}", key, value);
    Ok(())
}

/// Parses a CLI value, keeping booleans and numbers typed. Anything else,
/// including YAML collection syntax, is stored as a literal string.
fn parse_scalar(raw: &str) -> Value {
    match serde_yaml::from_str::<Value>(raw) {
        Ok(value @ (Value::Bool(_) | Value::Number(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}
