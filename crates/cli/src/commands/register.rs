//! Provider registration commands.
//!
//! Responsibilities:
//! - List bundled provider kinds (`register list`).
//! - Print a provider sample and its attributes (`register sample`).
//! - Fill a sample with attributes and store it (`register update`).
//! - Remove a registered entry (`register remove`).
//!
//! Does NOT handle:
//! - Sample definitions (see `samples`).
//!
//! Invariants:
//! - Explicit KEY=VALUE attributes override file-sourced attributes, and
//!   the last duplicate of an explicit attribute wins.
//! - Nothing is stored while any sample attribute is still unfilled.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use nimbus_config::constants::ROOT_KEY;
use nimbus_config::{ConfigStore, Value, expand_tilde, placeholders};

use crate::samples;

#[derive(Subcommand)]
pub enum RegisterCommand {
    /// List the provider kinds with bundled samples
    List {
        /// Service to list kinds for (cloud or storage)
        #[arg(long)]
        service: Option<String>,
    },

    /// Print the bundled sample for a provider kind
    Sample {
        /// Provider kind, e.g. aws or openstack
        #[arg(long)]
        kind: String,

        /// Service the kind belongs to
        #[arg(long, default_value = "cloud")]
        service: String,
    },

    /// Fill a provider sample with attributes and store it
    Update {
        /// Provider kind, e.g. aws or openstack
        #[arg(long)]
        kind: String,

        /// Entry name (defaults to the kind)
        #[arg(long)]
        name: Option<String>,

        /// Service the entry belongs to
        #[arg(long, default_value = "cloud")]
        service: String,

        /// JSON credential file to read attributes from
        #[arg(long, value_name = "FILE")]
        filename: Option<PathBuf>,

        /// Print the filled entry without storing it
        #[arg(long)]
        dry_run: bool,

        /// Attribute assignments, e.g. region=us-east-1
        #[arg(value_name = "KEY=VALUE")]
        attributes: Vec<String>,
    },

    /// Remove a registered entry and persist the file
    Remove {
        /// Entry name to remove
        #[arg(long)]
        name: String,

        /// Service the entry belongs to
        #[arg(long, default_value = "cloud")]
        service: String,
    },
}

/// Entry point for `nimbus register` subcommands.
pub fn run(command: RegisterCommand, config_path: &Path) -> Result<()> {
    match command {
        RegisterCommand::List { service } => run_list(service.as_deref()),
        RegisterCommand::Sample { kind, service } => run_sample(&kind, &service),
        RegisterCommand::Update {
            kind,
            name,
            service,
            filename,
            dry_run,
            attributes,
        } => run_update(
            &kind,
            name,
            &service,
            filename.as_deref(),
            dry_run,
            &attributes,
            config_path,
        ),
        RegisterCommand::Remove { name, service } => run_remove(&name, &service, config_path),
    }
}

fn run_list(service: Option<&str>) -> Result<()> {
    match service {
        Some(service) => {
            let service = normalize_service(service);
            let kinds = samples::kinds(service);
            if kinds.is_empty() {
                bail!(
                    "unknown service '{}'; known services: {}",
                    service,
                    samples::services().join(", ")
                );
            }
            for kind in kinds {
                println!("{}", kind);
            }
        }
        None => {
            for service in samples::services() {
                println!("{}: {}", service, samples::kinds(service).join(", "));
            }
        }
    }
    Ok(())
}

fn run_sample(kind: &str, service: &str) -> Result<()> {
    let service = normalize_service(service);
    let sample = lookup_sample(service, kind)?;
    print!("{}", sample.entry);

    let mut names: Vec<String> = placeholders(sample.entry)
        .iter()
        .map(|token| trim_braces(token).to_string())
        .collect();
    names.sort();

    println!();
    println!("Attributes:");
    for name in names {
        println!("    {}", name);
    }
    Ok(())
}

fn run_update(
    kind: &str,
    name: Option<String>,
    service: &str,
    filename: Option<&Path>,
    dry_run: bool,
    attributes: &[String],
    config_path: &Path,
) -> Result<()> {
    let service = normalize_service(service);
    let sample = lookup_sample(service, kind)?;
    let entry_name = name.unwrap_or_else(|| kind.to_string());

    let mut merged = merge_attributes(filename, attributes)?;
    merged
        .entry("name".to_string())
        .or_insert_with(|| entry_name.clone());

    let attribute_names: Vec<&String> = merged.keys().collect();
    tracing::debug!(service, kind, attributes = ?attribute_names, "filling provider sample");

    let filled = fill_sample(sample.entry, &merged)?;
    let entry: Value = serde_yaml::from_str(&filled).context("filled sample is not valid YAML")?;

    if dry_run {
        print!("{}", serde_yaml::to_string(&entry)?);
        return Ok(());
    }

    let key = format!("{}.{}.{}", ROOT_KEY, service, entry_name);
    let mut store = ConfigStore::load(config_path)?;
    store.set(&key, entry)?;
    println!("Registered {}", key);
    Ok(())
}

fn run_remove(name: &str, service: &str, config_path: &Path) -> Result<()> {
    let service = normalize_service(service);
    let key = format!("{}.{}.{}", ROOT_KEY, service, name);
    let mut store = ConfigStore::load(config_path)?;
    store.remove(&key)?;
    println!("Removed {}", key);
    Ok(())
}

/// The original tooling accepted compute as an alias for the cloud service.
fn normalize_service(service: &str) -> &str {
    if service == "compute" { "cloud" } else { service }
}

fn lookup_sample(service: &str, kind: &str) -> Result<&'static samples::Sample> {
    let known = samples::kinds(service);
    if known.is_empty() {
        bail!(
            "unknown service '{}'; known services: {}",
            service,
            samples::services().join(", ")
        );
    }
    match samples::sample(service, kind) {
        Some(sample) => Ok(sample),
        None => bail!(
            "unknown kind '{}' for service '{}'; known kinds: {}",
            kind,
            service,
            known.join(", ")
        ),
    }
}

/// Merges attributes from an optional JSON credential file with explicit
/// KEY=VALUE arguments. Explicit attributes override file values.
fn merge_attributes(
    filename: Option<&Path>,
    attributes: &[String],
) -> Result<BTreeMap<String, String>> {
    let mut merged = BTreeMap::new();

    if let Some(filename) = filename {
        let read_path = expand_tilde(filename)?;
        let text = fs::read_to_string(&read_path)
            .with_context(|| format!("cannot read credential file {}", read_path.display()))?;
        let parsed: serde_json::Value = serde_json::from_str(&text).with_context(|| {
            format!("credential file {} is not valid JSON", read_path.display())
        })?;
        let Some(object) = parsed.as_object() else {
            bail!(
                "credential file {} must hold a JSON object",
                read_path.display()
            );
        };
        for (key, value) in object {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                _ => bail!(
                    "attribute '{}' in {} is not a scalar",
                    key,
                    read_path.display()
                ),
            };
            merged.insert(key.clone(), rendered);
        }
        // The file path itself is recorded as the filename attribute, as given.
        merged.insert("filename".to_string(), filename.display().to_string());
    }

    for attribute in attributes {
        let Some((key, value)) = attribute.split_once('=') else {
            bail!("malformed attribute '{}', expected KEY=VALUE", attribute);
        };
        merged.insert(key.to_string(), value.to_string());
    }

    Ok(merged)
}

/// Fills every quoted "{attribute}" slot in a sample. Unfilled slots are an
/// error naming the missing attributes.
fn fill_sample(entry: &str, attributes: &BTreeMap<String, String>) -> Result<String> {
    let mut filled = entry.to_string();
    let mut missing = Vec::new();
    for token in placeholders(entry) {
        let name = trim_braces(&token);
        match attributes.get(name) {
            Some(value) => filled = filled.replace(&token, value),
            None => missing.push(name.to_string()),
        }
    }
    if !missing.is_empty() {
        missing.sort();
        bail!("missing attributes: {}", missing.join(", "));
    }
    Ok(filled)
}

/// Strips the surrounding braces from a placeholder token.
fn trim_braces(token: &str) -> &str {
    &token[1..token.len() - 1]
}
