//! Repository over the three artifact directories.
//!
//! The filesystem is the only database: a feature exists because its file
//! does. Components never touch paths directly — they go through the store,
//! so tests can exercise them against a temp directory.

use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ArtifactKind
// ---------------------------------------------------------------------------

/// One of the three file sets a feature identifier links together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Feature,
    Steps,
    Doc,
}

impl ArtifactKind {
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Feature => "feature",
            ArtifactKind::Steps => "step definition",
            ArtifactKind::Doc => "documentation",
        }
    }
}

// ---------------------------------------------------------------------------
// FeatureStore
// ---------------------------------------------------------------------------

/// Path and enumeration logic for a single project root.
#[derive(Debug, Clone)]
pub struct FeatureStore {
    root: PathBuf,
    steps_ext: String,
}

impl FeatureStore {
    pub fn new(root: impl Into<PathBuf>, steps_ext: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            steps_ext: steps_ext.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir(&self, kind: ArtifactKind) -> PathBuf {
        match kind {
            ArtifactKind::Feature => paths::features_dir(&self.root),
            ArtifactKind::Steps => paths::step_definitions_dir(&self.root),
            ArtifactKind::Doc => paths::feature_docs_dir(&self.root),
        }
    }

    fn suffix(&self, kind: ArtifactKind) -> String {
        match kind {
            ArtifactKind::Feature => paths::FEATURE_SUFFIX.to_string(),
            ArtifactKind::Steps => format!(".steps.{}", self.steps_ext),
            ArtifactKind::Doc => paths::DOC_SUFFIX.to_string(),
        }
    }

    pub fn path(&self, kind: ArtifactKind, id: &str) -> PathBuf {
        match kind {
            ArtifactKind::Feature => paths::feature_path(&self.root, id),
            ArtifactKind::Steps => paths::steps_path(&self.root, id, &self.steps_ext),
            ArtifactKind::Doc => paths::doc_path(&self.root, id),
        }
    }

    /// Display path relative to the project root, for report output.
    pub fn display_path(&self, kind: ArtifactKind, id: &str) -> String {
        match kind {
            ArtifactKind::Feature => format!("{}/{id}{}", paths::FEATURES_DIR, paths::FEATURE_SUFFIX),
            ArtifactKind::Steps => format!(
                "{}/{id}.steps.{}",
                paths::STEP_DEFINITIONS_DIR,
                self.steps_ext
            ),
            ArtifactKind::Doc => format!("{}/{id}{}", paths::FEATURE_DOCS_DIR, paths::DOC_SUFFIX),
        }
    }

    pub fn exists(&self, kind: ArtifactKind, id: &str) -> bool {
        self.path(kind, id).exists()
    }

    /// Enumerate feature identifiers of one kind by stripping the kind's
    /// suffix from each file name. A missing directory is an empty set.
    pub fn list(&self, kind: ArtifactKind) -> Result<BTreeSet<String>> {
        let dir = self.dir(kind);
        if !dir.exists() {
            return Ok(BTreeSet::new());
        }
        let suffix = self.suffix(kind);
        let mut ids = BTreeSet::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(suffix.as_str()) {
                if !stem.is_empty() {
                    ids.insert(stem.to_string());
                }
            }
        }
        Ok(ids)
    }

    pub fn read(&self, kind: ArtifactKind, id: &str) -> Result<String> {
        paths::validate_id(id)?;
        Ok(std::fs::read_to_string(self.path(kind, id))?)
    }

    pub fn write(&self, kind: ArtifactKind, id: &str, content: &str) -> Result<()> {
        paths::validate_id(id)?;
        crate::io::atomic_write(&self.path(kind, id), content.as_bytes())
    }

    pub fn delete(&self, kind: ArtifactKind, id: &str) -> Result<()> {
        paths::validate_id(id)?;
        std::fs::remove_file(self.path(kind, id))?;
        Ok(())
    }

    /// Rename an artifact from `old` to `new` within its directory.
    pub fn rename(&self, kind: ArtifactKind, old: &str, new: &str) -> Result<()> {
        paths::validate_id(old)?;
        paths::validate_id(new)?;
        std::fs::rename(self.path(kind, old), self.path(kind, new))?;
        Ok(())
    }

    /// Convert a feature path as printed by the test runner (for example
    /// `features/cart.feature` or `cart.feature`) into an identifier.
    pub fn id_from_feature_path(path: &str) -> Option<String> {
        let stem = Path::new(path).file_name()?.to_string_lossy();
        let id = stem.strip_suffix(paths::FEATURE_SUFFIX)?;
        if id.is_empty() {
            return None;
        }
        Some(id.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FeatureStore {
        FeatureStore::new(dir.path(), "js")
    }

    #[test]
    fn list_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        assert!(s.list(ArtifactKind::Feature).unwrap().is_empty());
        assert!(s.list(ArtifactKind::Steps).unwrap().is_empty());
        assert!(s.list(ArtifactKind::Doc).unwrap().is_empty());
    }

    #[test]
    fn list_strips_suffixes() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.write(ArtifactKind::Feature, "login", "Feature: Login\n")
            .unwrap();
        s.write(ArtifactKind::Feature, "checkout", "Feature: Checkout\n")
            .unwrap();
        s.write(ArtifactKind::Steps, "login", "// steps").unwrap();
        s.write(ArtifactKind::Doc, "login", "# Login").unwrap();

        let features: Vec<_> = s.list(ArtifactKind::Feature).unwrap().into_iter().collect();
        assert_eq!(features, vec!["checkout", "login"]);
        assert_eq!(s.list(ArtifactKind::Steps).unwrap().len(), 1);
        assert_eq!(s.list(ArtifactKind::Doc).unwrap().len(), 1);
    }

    #[test]
    fn list_ignores_other_suffixes_and_dirs() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.write(ArtifactKind::Feature, "login", "Feature: Login\n")
            .unwrap();
        // step_definitions lives inside features/ but is a directory
        s.write(ArtifactKind::Steps, "login", "// steps").unwrap();
        std::fs::write(dir.path().join("features/notes.txt"), "not a feature").unwrap();

        let features = s.list(ArtifactKind::Feature).unwrap();
        assert_eq!(features.len(), 1);
        assert!(features.contains("login"));
    }

    #[test]
    fn steps_suffix_uses_configured_ext() {
        let dir = TempDir::new().unwrap();
        let s = FeatureStore::new(dir.path(), "ts");
        s.write(ArtifactKind::Steps, "login", "// steps").unwrap();
        assert!(dir
            .path()
            .join("features/step_definitions/login.steps.ts")
            .exists());
        assert!(s.list(ArtifactKind::Steps).unwrap().contains("login"));
    }

    #[test]
    fn id_from_feature_path_variants() {
        assert_eq!(
            FeatureStore::id_from_feature_path("features/cart.feature").as_deref(),
            Some("cart")
        );
        assert_eq!(
            FeatureStore::id_from_feature_path("cart.feature").as_deref(),
            Some("cart")
        );
        assert_eq!(FeatureStore::id_from_feature_path("cart.txt"), None);
        assert_eq!(FeatureStore::id_from_feature_path(".feature"), None);
    }

    #[test]
    fn traversal_ids_rejected() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        assert!(s.write(ArtifactKind::Doc, "../escape", "bad").is_err());
        assert!(s.read(ArtifactKind::Feature, "a/b").is_err());
        assert!(s.delete(ArtifactKind::Steps, "").is_err());
    }
}
