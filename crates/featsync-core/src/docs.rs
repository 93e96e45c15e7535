//! Documentation stubs and the documentation status report.

use crate::error::Result;
use crate::store::{ArtifactKind, FeatureStore};
use crate::{io, paths};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// Stub generation
// ---------------------------------------------------------------------------

fn stub_template(title: &str) -> String {
    format!(
        "\
# Feature: {title}

## Overview
[Describe what this feature tests and its business purpose]

## Prerequisites
- Browser requirements: Chrome 90+, Firefox 88+, Safari 14+, Edge 90+
- Test data: [Describe any required test data]
- Environment setup: [Describe setup requirements]

## Test Scenarios

### Scenario: [Scenario Name]
- **Given**: [Initial conditions]
- **When**: [Actions performed]
- **Then**: [Expected outcomes]

**Purpose**: [Explain why this scenario is important]

**Business Value**: [Describe the business value this test provides]

## Implementation Details

### Browser Automation Approach
- [Describe the automation strategy]
- [List key user interactions to test]
- [Mention validation points]

### Expected User Journey
1. [Step 1 of user journey]
2. [Step 2 of user journey]
3. [Continue with remaining steps...]

## Browser Compatibility
- Chrome: Supported
- Firefox: Supported
- Safari: Supported
- Edge: Supported

## Troubleshooting

### Common Issues
- [List potential issues and solutions]

### Debug Steps
1. [Debug step 1]
2. [Debug step 2]
3. [Continue with additional debug steps...]

## Future Enhancements
- [List potential improvements]
- [Additional scenarios to consider]
- [Performance or accessibility considerations]
"
    )
}

/// Write a documentation stub for every feature that lacks one. Existing
/// docs are never overwritten. Returns the identifiers written.
pub fn generate_stubs(store: &FeatureStore) -> Result<Vec<String>> {
    io::ensure_dir(&paths::feature_docs_dir(store.root()))?;

    let mut written = Vec::new();
    for id in store.list(ArtifactKind::Feature)? {
        let stub = stub_template(&paths::humanize(&id));
        let path = store.path(ArtifactKind::Doc, &id);
        if io::write_if_missing(&path, stub.as_bytes())? {
            written.push(id);
        }
    }
    Ok(written)
}

// ---------------------------------------------------------------------------
// Status report
// ---------------------------------------------------------------------------

/// Framework docs checked for presence. The status column is editorial:
/// which of these the project has actually finished writing.
pub const FRAMEWORK_DOCS: &[(&str, &str, &str)] = &[
    ("AUTO_STEPS.md", "Auto-generation guide", "complete"),
    ("architecture.md", "Framework architecture", "planned"),
    ("browser-automation.md", "Browser testing guide", "planned"),
    ("ci-cd.md", "CI/CD integration", "planned"),
];

#[derive(Debug, Clone, Serialize)]
pub struct FrameworkDocStatus {
    pub file: String,
    pub description: String,
    pub status: String,
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocsReport {
    pub documented: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    pub orphaned: BTreeSet<String>,
    pub framework: Vec<FrameworkDocStatus>,
    pub has_docs_index: bool,
    pub has_project_readme: bool,
    pub has_ai_instructions: bool,
}

impl DocsReport {
    pub fn check(store: &FeatureStore) -> Result<Self> {
        let features = store.list(ArtifactKind::Feature)?;
        let docs = store.list(ArtifactKind::Doc)?;

        let documented = features.intersection(&docs).cloned().collect();
        let missing = features.difference(&docs).cloned().collect();
        let orphaned = docs.difference(&features).cloned().collect();

        let framework_dir = paths::framework_docs_dir(store.root());
        let framework = FRAMEWORK_DOCS
            .iter()
            .map(|(file, description, status)| FrameworkDocStatus {
                file: (*file).to_string(),
                description: (*description).to_string(),
                status: (*status).to_string(),
                exists: framework_dir.join(file).exists(),
            })
            .collect();

        Ok(Self {
            documented,
            missing,
            orphaned,
            framework,
            has_docs_index: store.root().join(paths::DOCS_DIR).join("README.md").exists(),
            has_project_readme: store.root().join("README.md").exists(),
            has_ai_instructions: store.root().join(".instructions.md").exists(),
        })
    }

    /// Documented-feature percentage, rounded; 100 when there are no features.
    pub fn coverage_percent(&self) -> u32 {
        let total = self.documented.len() + self.missing.len();
        if total == 0 {
            return 100;
        }
        ((self.documented.len() as f64 / total as f64) * 100.0).round() as u32
    }
}

/// List the current documentation files, for the post-generation summary.
pub fn list_doc_files(root: &Path) -> Result<Vec<String>> {
    let dir = paths::feature_docs_dir(root);
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(paths::DOC_SUFFIX) {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
