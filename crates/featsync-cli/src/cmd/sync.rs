use crate::output::{print_json, print_table};
use anyhow::Context;
use featsync_core::config::Config;
use featsync_core::store::{ArtifactKind, FeatureStore};
use featsync_core::sync::{self, Outcome, SyncReport};
use std::path::Path;

pub fn run(root: &Path, clean: bool, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load featsync.yaml")?;
    let store = FeatureStore::new(root, &config.steps_ext);
    let report = SyncReport::check(&store).context("failed to scan artifact directories")?;

    if clean {
        run_cleanup(&store, &report, json)
    } else {
        report_status(&store, &report, json)
    }
}

fn report_status(store: &FeatureStore, report: &SyncReport, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(report);
    }

    println!("Synchronization status: {} feature(s)", report.features.len());

    let synced = report.synced();
    if !synced.is_empty() {
        println!("\nSynchronized features:");
        let rows = synced
            .iter()
            .map(|id| {
                vec![
                    format!("{id}.feature"),
                    store.display_path(ArtifactKind::Steps, id),
                    format!("{id}.md"),
                ]
            })
            .collect();
        print_table(&["FEATURE", "STEPS", "DOC"], rows);
    }

    if !report.missing_steps.is_empty() {
        println!("\nMissing step definitions:");
        for id in &report.missing_steps {
            println!(
                "  {id}.feature -> missing {}",
                store.display_path(ArtifactKind::Steps, id)
            );
        }
    }

    if !report.missing_docs.is_empty() {
        println!("\nMissing documentation:");
        for id in &report.missing_docs {
            println!(
                "  {id}.feature -> missing {}",
                store.display_path(ArtifactKind::Doc, id)
            );
        }
    }

    if !report.orphaned_steps.is_empty() {
        println!("\nOrphaned step definitions (no corresponding .feature file):");
        for id in &report.orphaned_steps {
            println!(
                "  {}",
                store.display_path(ArtifactKind::Steps, id)
            );
        }
    }

    if !report.orphaned_docs.is_empty() {
        println!("\nOrphaned documentation (no corresponding .feature file):");
        for id in &report.orphaned_docs {
            println!(
                "  {}",
                store.display_path(ArtifactKind::Doc, id)
            );
        }
    }

    if !report.has_issues() {
        println!("\nAll files are synchronized.");
    } else {
        println!("\nRecommended actions:");
        if !report.missing_steps.is_empty() {
            println!("  - run `featsync generate` to generate missing step definitions");
        }
        if !report.missing_docs.is_empty() {
            println!("  - run `featsync docs generate` to create missing documentation");
        }
        if !report.orphaned_steps.is_empty() || !report.orphaned_docs.is_empty() {
            println!("  - run `featsync sync --clean` to remove orphaned files");
        }
    }

    Ok(())
}

fn run_cleanup(store: &FeatureStore, report: &SyncReport, json: bool) -> anyhow::Result<()> {
    let cleaned = sync::cleanup(store, report);

    if json {
        return print_json(&cleaned);
    }

    println!("Cleaning up orphaned files...");
    for removal in &cleaned.removals {
        match &removal.outcome {
            Outcome::Removed => println!("  removed: {}", removal.path),
            Outcome::Failed(reason) => println!("  failed:  {} ({reason})", removal.path),
        }
    }

    if cleaned.removals.is_empty() {
        println!("No orphaned files found - everything is clean.");
    } else {
        println!("\nCleanup complete: removed {} file(s).", cleaned.removed_count());
        let failed = cleaned.failures().count();
        if failed > 0 {
            println!("{failed} file(s) could not be removed (see above).");
        }
    }

    Ok(())
}
