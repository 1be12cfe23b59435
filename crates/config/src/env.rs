//! Environment helpers for the configuration store.
//!
//! Responsibilities:
//! - Read environment variables with empty/whitespace filtering.
//! - Load `.env` files before command-line parsing, honoring `DOTENV_DISABLED`.
//!
//! Does NOT handle:
//! - Expansion of `$VAR` references inside document text (see paths.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Dotenv errors never include raw .env line contents.

use crate::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    let raw = std::env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == raw.len() {
        // No trimming needed, return original to avoid allocation
        Some(raw)
    } else {
        Some(trimmed.to_string())
    }
}

/// Load environment variables from a `.env` file if one is present.
///
/// If the `DOTENV_DISABLED` environment variable is set to "true" or "1",
/// the `.env` file is not loaded (useful for testing). Missing `.env` files
/// are silently ignored.
///
/// # Errors
///
/// Returns an error if:
/// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
/// - The `.env` file exists but cannot be read (`ConfigError::DotenvIo`)
///
/// SAFETY: Error messages never include raw .env line contents to prevent
/// secret leakage.
pub fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(ConfigError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}
