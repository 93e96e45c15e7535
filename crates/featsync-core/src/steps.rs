//! Merges extracted step snippets into step-definition files.

use crate::config::Config;
use crate::error::Result;
use crate::store::{ArtifactKind, FeatureStore};
use crate::{runner, snippets};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Scaffold for a brand-new step-definition file.
const STEPS_BOILERPLATE: &str = "\
const assert = require('assert');
const { Given, When, Then } = require('@cucumber/cucumber');

";

static MATCHER_RE: OnceLock<Regex> = OnceLock::new();

/// Pulls the quoted matcher text out of a snippet's opening line.
fn matcher_re() -> &'static Regex {
    MATCHER_RE.get_or_init(|| Regex::new(r"(?:Given|When|Then)\('([^']+)'").unwrap())
}

/// Whether `content` already defines (or merely mentions, quoted) the
/// snippet's matcher. Textual containment, not semantic: a matcher quoted in
/// a comment also counts as defined. Snippets with no recognizable matcher
/// are always treated as new.
fn already_defined(content: &str, snippet: &str) -> bool {
    match matcher_re().captures(snippet) {
        Some(caps) => content.contains(&format!("'{}'", &caps[1])),
        None => false,
    }
}

/// Merge `new_snippets` into the step-definition file for `id`, scaffolding
/// the file when absent. Returns how many snippets were appended.
pub fn merge_snippets(store: &FeatureStore, id: &str, new_snippets: &[String]) -> Result<usize> {
    let existing = if store.exists(ArtifactKind::Steps, id) {
        store.read(ArtifactKind::Steps, id)?
    } else {
        STEPS_BOILERPLATE.to_string()
    };

    let fresh: Vec<&String> = new_snippets
        .iter()
        .filter(|s| !already_defined(&existing, s))
        .collect();

    if fresh.is_empty() {
        return Ok(0);
    }

    let mut content = existing;
    content.push('\n');
    for (i, snippet) in fresh.iter().enumerate() {
        if i > 0 {
            content.push_str("\n\n");
        }
        content.push_str(snippet);
    }
    content.push('\n');

    store.write(ArtifactKind::Steps, id, &content)?;
    Ok(fresh.len())
}

// ---------------------------------------------------------------------------
// Generate pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    /// Runner output contained the snippet marker.
    pub had_undefined: bool,
    /// Runner output mentioned pending steps.
    pub has_pending: bool,
    /// Snippets appended per feature identifier.
    pub generated: BTreeMap<String, usize>,
}

impl GenerateReport {
    pub fn total(&self) -> usize {
        self.generated.values().sum()
    }
}

/// Run the test runner, extract undefined-step snippets, and merge them into
/// the per-feature step-definition files.
pub fn auto_generate(store: &FeatureStore, config: &Config) -> Result<GenerateReport> {
    let output = runner::run(store.root(), config)?;

    let had_undefined = output.contains(snippets::SNIPPET_MARKER);
    let has_pending = output.contains("pending");
    let mut report = GenerateReport {
        had_undefined,
        has_pending,
        generated: BTreeMap::new(),
    };

    if !had_undefined {
        return Ok(report);
    }

    for (feature_path, texts) in snippets::extract_snippets(&output) {
        let Some(id) = FeatureStore::id_from_feature_path(&feature_path) else {
            tracing::warn!(path = %feature_path, "skipping unparseable feature path");
            continue;
        };
        let appended = merge_snippets(store, &id, &texts)?;
        report.generated.insert(id, appended);
    }

    Ok(report)
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

    fn snippet(matcher: &str) -> String {
        format!("Given('{matcher}', function () {{\n  return 'pending';\n}});")
    }

    #[test]
    fn scaffolds_new_file_with_boilerplate() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let appended = merge_snippets(&s, "cart", &[snippet("the cart is empty")]).unwrap();
        assert_eq!(appended, 1);

        let content = s.read(ArtifactKind::Steps, "cart").unwrap();
        assert!(content.starts_with("const assert = require('assert');"));
        assert!(content.contains("@cucumber/cucumber"));
        assert!(content.contains("'the cart is empty'"));
    }

    #[test]
    fn appending_same_matcher_twice_writes_once() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        merge_snippets(&s, "cart", &[snippet("a product exists")]).unwrap();
        let second = merge_snippets(&s, "cart", &[snippet("a product exists")]).unwrap();
        assert_eq!(second, 0);

        let content = s.read(ArtifactKind::Steps, "cart").unwrap();
        assert_eq!(content.matches("'a product exists'").count(), 1);
    }

    #[test]
    fn matcher_quoted_in_comment_counts_as_defined() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.write(
            ArtifactKind::Steps,
            "cart",
            "// TODO: implement 'the cart is empty' properly\n",
        )
        .unwrap();
        let appended = merge_snippets(&s, "cart", &[snippet("the cart is empty")]).unwrap();
        assert_eq!(appended, 0);
    }

    #[test]
    fn snippet_without_matcher_always_appended() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let odd = "defineParameterType({ name: 'color' });".to_string();
        assert_eq!(merge_snippets(&s, "cart", &[odd.clone()]).unwrap(), 1);
        assert_eq!(merge_snippets(&s, "cart", &[odd]).unwrap(), 1);
    }

    #[test]
    fn snippets_separated_by_blank_lines() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        merge_snippets(&s, "cart", &[snippet("one"), snippet("two")]).unwrap();
        let content = s.read(ArtifactKind::Steps, "cart").unwrap();
        assert!(content.contains("});\n\nGiven('two'"));
        assert!(content.ends_with("});\n"));
    }

    #[test]
    fn preserves_hand_written_content() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let hand = "const assert = require('assert');\n\nGiven('existing', () => {});\n";
        s.write(ArtifactKind::Steps, "cart", hand).unwrap();
        merge_snippets(&s, "cart", &[snippet("brand new")]).unwrap();

        let content = s.read(ArtifactKind::Steps, "cart").unwrap();
        assert!(content.contains("Given('existing', () => {});"));
        assert!(content.contains("'brand new'"));
    }

    #[test]
    fn auto_generate_end_to_end_with_stub_runner() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.write(ArtifactKind::Feature, "cart", "Feature: Cart\n")
            .unwrap();

        std::fs::write(
            dir.path().join("fixture.txt"),
            "\
Scenario: Add item # features/cart.feature:3

Implement with the following snippet:

  Given('the cart is empty', function () {
    return 'pending';
  });
",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("runner.sh"),
            "#!/bin/sh\ncat fixture.txt\nexit 1\n",
        )
        .unwrap();

        let config = Config {
            runner: "sh runner.sh".to_string(),
            ..Config::default()
        };
        let report = auto_generate(&s, &config).unwrap();
        assert!(report.had_undefined);
        assert_eq!(report.total(), 1);
        assert_eq!(report.generated["cart"], 1);
        assert!(s
            .read(ArtifactKind::Steps, "cart")
            .unwrap()
            .contains("'the cart is empty'"));
    }

    #[test]
    fn auto_generate_all_defined() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        std::fs::write(
            dir.path().join("runner.sh"),
            "#!/bin/sh\necho '3 scenarios (3 passed)'\n",
        )
        .unwrap();
        let config = Config {
            runner: "sh runner.sh".to_string(),
            ..Config::default()
        };
        let report = auto_generate(&s, &config).unwrap();
        assert!(!report.had_undefined);
        assert_eq!(report.total(), 0);
    }
}
