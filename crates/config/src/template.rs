//! `{dotted.path}` placeholder resolution over raw document text.
//!
//! Responsibilities:
//! - Scan text for `{dotted.path}` placeholder tokens.
//! - Substitute each token with the scalar value the document holds at that
//!   path, textually and across all occurrences.
//!
//! Does NOT handle:
//! - Environment variable expansion (runs earlier, see paths.rs).
//! - Whether a document is loadable at all (see store.rs).
//!
//! Invariants:
//! - Tokens are collected from the original text once, deduplicated, and
//!   processed in first-appearance order.
//! - Each substitution re-parses the current text, so earlier substitutions
//!   are visible to later tokens within the same pass.
//! - A token whose value still contains `{` is skipped, never substituted.
//! - A token whose path is missing fails the whole resolution.

use std::path::Path;

use crate::constants::MAX_RESOLVE_PASSES;
use crate::document::{Document, scalar_to_string};
use crate::error::{Access, ConfigError};

/// How placeholder substitution iterates.
///
/// `SinglePass` mirrors the historical behavior: one sweep over the tokens
/// found in the original text. Chained placeholders resolve only when their
/// appearance order matches their dependency order. `Fixpoint` repeats the
/// sweep until the text stops changing and then fails if any placeholder
/// survived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    #[default]
    SinglePass,
    Fixpoint,
}

/// Resolves `{dotted.path}` placeholders in `text` against the document the
/// text itself parses to.
///
/// `file` is only used for error context.
pub fn resolve_placeholders(
    text: &str,
    file: &Path,
    mode: ResolveMode,
) -> Result<String, ConfigError> {
    match mode {
        ResolveMode::SinglePass => substitute_pass(text, file),
        ResolveMode::Fixpoint => {
            let mut current = text.to_string();
            for _ in 0..MAX_RESOLVE_PASSES {
                let next = substitute_pass(&current, file)?;
                if next == current {
                    break;
                }
                current = next;
            }
            let leftovers = placeholders(&current);
            if leftovers.is_empty() {
                Ok(current)
            } else {
                Err(ConfigError::UnresolvedPlaceholders {
                    tokens: leftovers,
                    path: file.to_path_buf(),
                })
            }
        }
    }
}

/// One substitution sweep.
///
/// Tokens come from a single scan of the input. For every token the current
/// text is re-parsed, the token's dotted path is resolved, and all textual
/// occurrences of the token are replaced when the value is a brace-free
/// scalar.
fn substitute_pass(text: &str, file: &Path) -> Result<String, ConfigError> {
    let mut current = text.to_string();
    for token in placeholders(text) {
        let document = Document::parse(&current, file)?;
        let key = &token[1..token.len() - 1];
        let Some(value) = document.get(key) else {
            return Err(ConfigError::KeyNotFound {
                key: key.to_string(),
                path: file.to_path_buf(),
                origin: Access::Template,
            });
        };
        if let Some(rendered) = scalar_to_string(value)
            && !rendered.contains('{')
        {
            current = current.replace(&token, &rendered);
        }
    }
    Ok(current)
}

/// Collects the distinct `{...}` tokens in `text`, in first-appearance order.
///
/// A token is a `{`, one or more non-`}` characters, and a closing `}`.
/// The returned strings include the braces.
pub fn placeholders(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) if end > 0 => {
                let token = &rest[start..start + end + 2];
                if !tokens.iter().any(|t| t == token) {
                    tokens.push(token.to_string());
                }
                rest = &after[end + 1..];
            }
            Some(end) => {
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    tokens
}
