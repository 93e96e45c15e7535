//! Renames a feature's artifact triplet in lockstep.
//!
//! The primary `.feature` rename is guarded by fatal preconditions checked
//! before any mutation. Everything after it (content rewrites, secondary
//! renames) is best-effort with a recorded outcome per step; nothing already
//! done is rolled back.

use crate::error::{FeatsyncError, Result};
use crate::paths;
use crate::store::{ArtifactKind, FeatureStore};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "reason")]
pub enum StepOutcome {
    Done,
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameStep {
    pub description: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameReport {
    pub old_id: String,
    pub new_id: String,
    /// True when old and new were identical and nothing was touched.
    pub noop: bool,
    pub steps: Vec<RenameStep>,
}

impl RenameReport {
    pub fn failures(&self) -> impl Iterator<Item = &RenameStep> {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Failed(_)))
    }
}

/// Replace every occurrence of the old display name (and, for docs, the raw
/// identifier) in the file's text.
fn rewrite_content(
    store: &FeatureStore,
    kind: ArtifactKind,
    id: &str,
    replacements: &[(String, String)],
) -> Result<()> {
    let mut content = store.read(kind, id)?;
    for (from, to) in replacements {
        content = content.replace(from.as_str(), to.as_str());
    }
    store.write(kind, id, &content)
}

fn record(steps: &mut Vec<RenameStep>, description: impl Into<String>, result: Result<()>) {
    let description = description.into();
    let outcome = match result {
        Ok(()) => StepOutcome::Done,
        Err(e) => {
            tracing::warn!(step = %description, "rename step failed: {e}");
            StepOutcome::Failed(e.to_string())
        }
    };
    steps.push(RenameStep {
        description,
        outcome,
    });
}

/// Rename `old_id` to `new_id` across the feature, step-definition, and
/// documentation files.
///
/// Renaming an identifier to itself is a defined no-op success. A missing
/// source feature file or an existing destination fails before any mutation.
pub fn rename(store: &FeatureStore, old_id: &str, new_id: &str) -> Result<RenameReport> {
    paths::validate_id(old_id)?;
    paths::validate_id(new_id)?;

    if old_id == new_id {
        return Ok(RenameReport {
            old_id: old_id.to_string(),
            new_id: new_id.to_string(),
            noop: true,
            steps: Vec::new(),
        });
    }

    if !store.exists(ArtifactKind::Feature, old_id) {
        return Err(FeatsyncError::FeatureNotFound(old_id.to_string()));
    }
    if store.exists(ArtifactKind::Feature, new_id) {
        return Err(FeatsyncError::FeatureExists(new_id.to_string()));
    }

    let old_title = paths::humanize(old_id);
    let new_title = paths::humanize(new_id);
    let title_swap = vec![(old_title.clone(), new_title.clone())];
    let doc_swap = vec![
        (old_title, new_title),
        (old_id.to_string(), new_id.to_string()),
    ];

    let mut steps = Vec::new();

    // The primary rename is the one mutation that must succeed.
    store.rename(ArtifactKind::Feature, old_id, new_id)?;
    steps.push(RenameStep {
        description: format!("rename {old_id}.feature -> {new_id}.feature"),
        outcome: StepOutcome::Done,
    });

    record(
        &mut steps,
        format!("update display name in {new_id}.feature"),
        rewrite_content(store, ArtifactKind::Feature, new_id, &title_swap),
    );

    if store.exists(ArtifactKind::Steps, old_id) {
        record(
            &mut steps,
            format!("rename step definitions {old_id} -> {new_id}"),
            store.rename(ArtifactKind::Steps, old_id, new_id),
        );
    } else {
        steps.push(RenameStep {
            description: "rename step definitions".to_string(),
            outcome: StepOutcome::Skipped,
        });
    }

    if store.exists(ArtifactKind::Doc, old_id) {
        let renamed = store.rename(ArtifactKind::Doc, old_id, new_id);
        let doc_renamed = renamed.is_ok();
        record(
            &mut steps,
            format!("rename documentation {old_id}.md -> {new_id}.md"),
            renamed,
        );
        if doc_renamed {
            record(
                &mut steps,
                format!("update display name in {new_id}.md"),
                rewrite_content(store, ArtifactKind::Doc, new_id, &doc_swap),
            );
        }
    } else {
        steps.push(RenameStep {
            description: "rename documentation".to_string(),
            outcome: StepOutcome::Skipped,
        });
    }

    Ok(RenameReport {
        old_id: old_id.to_string(),
        new_id: new_id.to_string(),
        noop: false,
        steps,
    })
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
    fn renames_full_triplet_and_rewrites_titles() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.write(
            ArtifactKind::Feature,
            "user_login",
            "Feature: User Login\n  Scenario: User Login works\n",
        )
        .unwrap();
        s.write(ArtifactKind::Steps, "user_login", "// steps\n")
            .unwrap();
        s.write(
            ArtifactKind::Doc,
            "user_login",
            "# Feature: User Login\n\nSee features/user_login.feature\n",
        )
        .unwrap();

        let report = rename(&s, "user_login", "authentication").unwrap();
        assert!(!report.noop);
        assert_eq!(report.failures().count(), 0);

        assert!(!s.exists(ArtifactKind::Feature, "user_login"));
        let spec = s.read(ArtifactKind::Feature, "authentication").unwrap();
        assert!(spec.contains("Feature: Authentication"));
        assert!(spec.contains("Scenario: Authentication works"));

        assert!(s.exists(ArtifactKind::Steps, "authentication"));

        let doc = s.read(ArtifactKind::Doc, "authentication").unwrap();
        assert!(doc.contains("# Feature: Authentication"));
        // Raw identifier occurrences are rewritten in docs as well.
        assert!(doc.contains("features/authentication.feature"));
    }

    #[test]
    fn missing_source_fails_before_mutation() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        assert!(matches!(
            rename(&s, "ghost", "new_name"),
            Err(FeatsyncError::FeatureNotFound(_))
        ));
    }

    #[test]
    fn existing_destination_fails_with_zero_mutations() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.write(ArtifactKind::Feature, "signup", "Feature: Signup\n")
            .unwrap();
        s.write(ArtifactKind::Feature, "login", "Feature: Login\n")
            .unwrap();
        s.write(ArtifactKind::Steps, "signup", "// steps\n").unwrap();

        assert!(matches!(
            rename(&s, "signup", "login"),
            Err(FeatsyncError::FeatureExists(_))
        ));

        // Nothing moved.
        assert!(s.exists(ArtifactKind::Feature, "signup"));
        assert!(s.exists(ArtifactKind::Steps, "signup"));
        assert_eq!(
            s.read(ArtifactKind::Feature, "signup").unwrap(),
            "Feature: Signup\n"
        );
    }

    #[test]
    fn identical_ids_is_noop_success() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.write(ArtifactKind::Feature, "signup", "Feature: Signup\n")
            .unwrap();

        let report = rename(&s, "signup", "signup").unwrap();
        assert!(report.noop);
        assert!(report.steps.is_empty());
        assert!(s.exists(ArtifactKind::Feature, "signup"));
    }

    #[test]
    fn missing_secondary_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.write(ArtifactKind::Feature, "solo", "Feature: Solo\n")
            .unwrap();

        let report = rename(&s, "solo", "solo_act").unwrap();
        assert_eq!(report.failures().count(), 0);
        let skipped = report
            .steps
            .iter()
            .filter(|st| matches!(st.outcome, StepOutcome::Skipped))
            .count();
        assert_eq!(skipped, 2);
    }
}
