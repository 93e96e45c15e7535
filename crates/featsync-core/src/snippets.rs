//! Extracts undefined-step snippets from test-runner output.
//!
//! The runner's human-oriented text is the de-facto protocol: scenario
//! headers name the source feature file, and each
//! `Implement with the following snippet:` marker is followed by one or more
//! step-definition blocks separated by blank lines. The scan keeps the
//! brittle parts in one pure function that tests feed captured fixtures.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Literal marker the runner prints before suggested step definitions.
pub const SNIPPET_MARKER: &str = "Implement with the following snippet:";

static SCENARIO_RE: OnceLock<Regex> = OnceLock::new();

/// Matches `Scenario: <name> # <path>.feature:<line>`, capturing the path.
fn scenario_re() -> &'static Regex {
    SCENARIO_RE.get_or_init(|| Regex::new(r"Scenario: .+ # (.+\.feature):\d+").unwrap())
}

fn is_step_keyword(line: &str) -> bool {
    line.starts_with("Given(") || line.starts_with("When(") || line.starts_with("Then(")
}

/// Scan runner output and group snippet texts by the feature path named in
/// the nearest preceding scenario header.
///
/// Snippets seen before any scenario header cannot be attributed and are
/// discarded. Within each feature the snippets are de-duplicated by exact
/// text, first appearance winning.
pub fn extract_snippets(output: &str) -> BTreeMap<String, Vec<String>> {
    let mut by_feature: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut current_feature: Option<String> = None;
    let mut buffer = String::new();
    let mut in_snippet = false;
    let mut awaiting_snippet = false;

    let mut flush = |feature: &Option<String>, buffer: &mut String| {
        let snippet = buffer.trim().to_string();
        buffer.clear();
        if snippet.is_empty() {
            return;
        }
        if let Some(feature) = feature {
            let snippets = by_feature.entry(feature.clone()).or_default();
            if !snippets.contains(&snippet) {
                snippets.push(snippet);
            }
        }
    };

    for raw in output.lines() {
        let line = raw.trim();

        if awaiting_snippet {
            if line.is_empty() {
                continue;
            }
            awaiting_snippet = false;
            // Attribution requires a preceding scenario header.
            in_snippet = current_feature.is_some();
        }

        if in_snippet {
            if line.is_empty() {
                flush(&current_feature, &mut buffer);
                in_snippet = false;
            } else if is_step_keyword(line) {
                flush(&current_feature, &mut buffer);
                buffer.push_str(line);
            } else {
                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(line);
            }
            continue;
        }

        if let Some(caps) = scenario_re().captures(line) {
            current_feature = Some(caps[1].to_string());
            continue;
        }

        if line.contains(SNIPPET_MARKER) {
            awaiting_snippet = true;
        }
    }

    if in_snippet {
        flush(&current_feature, &mut buffer);
    }

    by_feature
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
