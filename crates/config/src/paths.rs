//! Path helpers and raw-text expansion for configuration file locations.
//!
//! Responsibilities:
//! - Determine the default document and variable store locations.
//! - Expand `~` prefixes in user-supplied paths.
//! - Expand environment variables and `~/` occurrences in raw document text
//!   before it is parsed.
//!
//! Does NOT handle:
//! - File I/O operations (see persist.rs).
//! - `{dotted.path}` placeholder resolution (see template.rs).
//!
//! Invariants:
//! - Unset environment variables are left in the text verbatim, never erased.
//! - Text expansion runs on the raw file content, before any YAML parsing.

use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, VARIABLES_FILE_NAME};
use crate::error::ConfigError;

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::HomeDirUnavailable)
}

/// Returns the default path to the configuration document.
///
/// This path is the **documented** config location: `~/.nimbus/nimbus.yaml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(home_dir()?.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Returns the variable store path that belongs to a configuration document.
///
/// The variable store always lives beside the document it was seeded from,
/// so isolated documents (tests, alternate `--config` paths) get isolated
/// variable stores.
pub fn variables_path_for(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) => parent.join(VARIABLES_FILE_NAME),
        None => PathBuf::from(VARIABLES_FILE_NAME),
    }
}

/// Expands a leading `~` component in a user-supplied path.
///
/// Paths without a `~` prefix are returned unchanged.
pub fn expand_tilde(path: &Path) -> Result<PathBuf, ConfigError> {
    match path.strip_prefix("~") {
        Ok(rest) => Ok(home_dir()?.join(rest)),
        Err(_) => Ok(path.to_path_buf()),
    }
}

/// Expands environment variables and home-directory shorthand in raw text.
///
/// Two forms of environment reference are recognized: `$NAME` and `${NAME}`.
/// References to unset variables stay in the text verbatim. A `~/` sequence
/// at the start of the text or after whitespace or a quote is replaced with
/// the home directory.
pub fn expand_text(text: &str) -> String {
    let home = home_dir().ok();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < text.len() {
        let next = match text[i..].find(['~', '$']) {
            Some(offset) => i + offset,
            None => text.len(),
        };
        if next > i {
            out.push_str(&text[i..next]);
            i = next;
            continue;
        }
        if text[i..].starts_with("~/") && tilde_starts_token(&out) {
            if let Some(home) = &home {
                out.push_str(&home.to_string_lossy());
                // keep the '/' so path separators stay intact
                i += 1;
                continue;
            }
        }
        if text[i..].starts_with('$') {
            let (expanded, consumed) = expand_variable(&text[i..]);
            out.push_str(&expanded);
            i += consumed;
            continue;
        }
        out.push('~');
        i += 1;
    }

    out
}

/// A `~` only counts as home shorthand at the start of a token.
fn tilde_starts_token(written: &str) -> bool {
    match written.chars().last() {
        None => true,
        Some(c) => c.is_whitespace() || c == '"' || c == '\'',
    }
}

/// Expands one `$NAME` or `${NAME}` reference at the start of `rest`.
///
/// Returns the replacement text and the number of bytes consumed. Unset or
/// malformed references are returned verbatim.
fn expand_variable(rest: &str) -> (String, usize) {
    let bytes = rest.as_bytes();

    if bytes.len() >= 2 && bytes[1] == b'{' {
        let Some(end) = rest[2..].find('}') else {
            return ("$".to_string(), 1);
        };
        let name = &rest[2..2 + end];
        let consumed = end + 3;
        if !name.is_empty()
            && let Ok(value) = std::env::var(name)
        {
            return (value, consumed);
        }
        return (rest[..consumed].to_string(), consumed);
    }

    let mut len = 0;
    while 1 + len < bytes.len() {
        let byte = bytes[1 + len];
        let valid = if len == 0 {
            byte == b'_' || byte.is_ascii_alphabetic()
        } else {
            byte == b'_' || byte.is_ascii_alphanumeric()
        };
        if !valid {
            break;
        }
        len += 1;
    }
    if len == 0 {
        return ("$".to_string(), 1);
    }

    let name = &rest[1..1 + len];
    match std::env::var(name) {
        Ok(value) => (value, len + 1),
        Err(_) => (rest[..len + 1].to_string(), len + 1),
    }
}
