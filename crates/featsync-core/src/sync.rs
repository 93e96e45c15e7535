//! Set algebra over the three artifact collections.
//!
//! A report is recomputed from the filesystem on every check and never
//! mutated in place. Cleanup is best-effort: each orphaned file gets its own
//! outcome, and one failure never stops the remaining deletions.

use crate::error::Result;
use crate::store::{ArtifactKind, FeatureStore};
use serde::Serialize;
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// SyncReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub features: BTreeSet<String>,
    pub step_defs: BTreeSet<String>,
    pub docs: BTreeSet<String>,

    /// features − step_defs
    pub missing_steps: BTreeSet<String>,
    /// features − docs
    pub missing_docs: BTreeSet<String>,
    /// step_defs − features
    pub orphaned_steps: BTreeSet<String>,
    /// docs − features
    pub orphaned_docs: BTreeSet<String>,
}

impl SyncReport {
    pub fn check(store: &FeatureStore) -> Result<Self> {
        let features = store.list(ArtifactKind::Feature)?;
        let step_defs = store.list(ArtifactKind::Steps)?;
        let docs = store.list(ArtifactKind::Doc)?;

        let missing_steps = features.difference(&step_defs).cloned().collect();
        let missing_docs = features.difference(&docs).cloned().collect();
        let orphaned_steps = step_defs.difference(&features).cloned().collect();
        let orphaned_docs = docs.difference(&features).cloned().collect();

        Ok(Self {
            features,
            step_defs,
            docs,
            missing_steps,
            missing_docs,
            orphaned_steps,
            orphaned_docs,
        })
    }

    /// Features whose spec, step-definition, and documentation files all exist.
    pub fn synced(&self) -> BTreeSet<String> {
        self.features
            .iter()
            .filter(|id| !self.missing_steps.contains(*id) && !self.missing_docs.contains(*id))
            .cloned()
            .collect()
    }

    pub fn has_issues(&self) -> bool {
        !self.missing_steps.is_empty()
            || !self.missing_docs.is_empty()
            || !self.orphaned_steps.is_empty()
            || !self.orphaned_docs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Cleanup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "reason")]
pub enum Outcome {
    Removed,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct Removal {
    pub kind: ArtifactKind,
    pub id: String,
    pub path: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct CleanupReport {
    pub removals: Vec<Removal>,
}

impl CleanupReport {
    pub fn removed_count(&self) -> usize {
        self.removals
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Removed))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Removal> {
        self.removals
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Failed(_)))
    }
}

/// Delete every file backing an orphaned step-definition or documentation
/// entry. Failures are recorded per file; the loop never aborts early.
pub fn cleanup(store: &FeatureStore, report: &SyncReport) -> CleanupReport {
    let mut out = CleanupReport::default();
    let targets = report
        .orphaned_steps
        .iter()
        .map(|id| (ArtifactKind::Steps, id))
        .chain(report.orphaned_docs.iter().map(|id| (ArtifactKind::Doc, id)));

    for (kind, id) in targets {
        let outcome = match store.delete(kind, id) {
            Ok(()) => Outcome::Removed,
            Err(e) => {
                tracing::warn!(id = %id, kind = kind.label(), "failed to remove orphan: {e}");
                Outcome::Failed(e.to_string())
            }
        };
        out.removals.push(Removal {
            kind,
            id: id.clone(),
            path: store.display_path(kind, id),
            outcome,
        });
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
