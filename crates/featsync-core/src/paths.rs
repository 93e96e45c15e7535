use crate::error::{FeatsyncError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const FEATURES_DIR: &str = "features";
pub const STEP_DEFINITIONS_DIR: &str = "features/step_definitions";
pub const DOCS_DIR: &str = "docs";
pub const FEATURE_DOCS_DIR: &str = "docs/features";
pub const FRAMEWORK_DOCS_DIR: &str = "docs/framework";

pub const CONFIG_FILE: &str = "featsync.yaml";

pub const FEATURE_SUFFIX: &str = ".feature";
pub const DOC_SUFFIX: &str = ".md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn features_dir(root: &Path) -> PathBuf {
    root.join(FEATURES_DIR)
}

pub fn step_definitions_dir(root: &Path) -> PathBuf {
    root.join(STEP_DEFINITIONS_DIR)
}

pub fn feature_docs_dir(root: &Path) -> PathBuf {
    root.join(FEATURE_DOCS_DIR)
}

pub fn framework_docs_dir(root: &Path) -> PathBuf {
    root.join(FRAMEWORK_DOCS_DIR)
}

pub fn feature_path(root: &Path, id: &str) -> PathBuf {
    features_dir(root).join(format!("{id}{FEATURE_SUFFIX}"))
}

/// `features/step_definitions/<id>.steps.<ext>`.
pub fn steps_path(root: &Path, id: &str, ext: &str) -> PathBuf {
    step_definitions_dir(root).join(format!("{id}.steps.{ext}"))
}

pub fn doc_path(root: &Path, id: &str) -> PathBuf {
    feature_docs_dir(root).join(format!("{id}{DOC_SUFFIX}"))
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Identifier validation
// ---------------------------------------------------------------------------

/// Feature identifiers are bare file stems. Reject anything that could
/// address a path outside the managed directories.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty()
        || id.contains('/')
        || id.contains('\\')
        || id.contains("..")
        || id.contains('\0')
    {
        return Err(FeatsyncError::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Display names
// ---------------------------------------------------------------------------

/// Humanize an identifier for display: underscores become spaces, the first
/// letter of each word is uppercased (`user_login` → `User Login`).
pub fn humanize(id: &str) -> String {
    id.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
