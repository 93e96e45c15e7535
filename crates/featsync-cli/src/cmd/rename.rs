use crate::output::print_json;
use anyhow::Context;
use featsync_core::config::Config;
use featsync_core::rename::{self, StepOutcome};
use featsync_core::store::FeatureStore;
use std::path::Path;

pub fn run(root: &Path, old: &str, new: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load featsync.yaml")?;
    let store = FeatureStore::new(root, &config.steps_ext);

    let report = rename::rename(&store, old, new)
        .with_context(|| format!("failed to rename feature '{old}' to '{new}'"))?;

    if json {
        return print_json(&report);
    }

    if report.noop {
        println!("Old and new identifiers are identical - nothing to do.");
        return Ok(());
    }

    println!("Renaming feature: {old} -> {new}");
    for step in &report.steps {
        match &step.outcome {
            StepOutcome::Done => println!("  done:    {}", step.description),
            StepOutcome::Skipped => println!("  skipped: {} (file not present)", step.description),
            StepOutcome::Failed(reason) => println!("  failed:  {} ({reason})", step.description),
        }
    }

    println!("\nFeature rename complete.");
    println!("You may want to review the feature content and documentation.");

    Ok(())
}
