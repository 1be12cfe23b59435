//! Centralized constants for the nimbus workspace.
//!
//! This module contains values shared across crates to avoid
//! magic string duplication and improve maintainability.

// =============================================================================
// Document Layout
// =============================================================================

/// Top-level key every configuration document is rooted at.
pub const ROOT_KEY: &str = "nimbus";

/// Dotted path of the default section inside the document.
pub const DEFAULT_SECTION_KEY: &str = "nimbus.default";

/// Key inside the default section naming the preferred cloud provider.
pub const DEFAULT_CLOUD_KEY: &str = "cloud";

// =============================================================================
// File Locations
// =============================================================================

/// Dotfile directory under the user's home directory.
pub const CONFIG_DIR_NAME: &str = ".nimbus";

/// File name of the primary configuration document.
pub const CONFIG_FILE_NAME: &str = "nimbus.yaml";

/// File name of the runtime variable store, kept beside the document.
pub const VARIABLES_FILE_NAME: &str = "variables.yaml";

// =============================================================================
// Variable Store Defaults
// =============================================================================

/// Variables guaranteed to exist after a document load.
pub const GUARANTEED_VARIABLES: &[&str] = &["trace", "debug"];

/// Value the guaranteed variables take when nothing else sets them.
pub const FLAG_DEFAULT: &str = "false";

// =============================================================================
// Template Resolution
// =============================================================================

/// Upper bound on substitution passes in fixpoint resolution mode.
pub const MAX_RESOLVE_PASSES: usize = 16;
