//! Long-lived watcher over the features directory.
//!
//! Events are handled sequentially as the notify backend delivers them.
//! Overlapping generation runs are possible if events arrive faster than the
//! pipeline completes; the generator's matcher de-duplication keeps the
//! step-definition files convergent.

use anyhow::Context;
use featsync_core::config::Config;
use featsync_core::store::{ArtifactKind, FeatureStore};
use featsync_core::{docs, paths, steps};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load featsync.yaml")?;
    let store = FeatureStore::new(root, &config.steps_ext);
    let features_dir = paths::features_dir(root);

    if !features_dir.is_dir() {
        anyhow::bail!("features directory not found: {}", features_dir.display());
    }

    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&stop))
        .context("failed to register SIGINT handler")?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&stop))
        .context("failed to register SIGTERM handler")?;

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.send(res);
        },
        notify::Config::default(),
    )
    .context("failed to create filesystem watcher")?;

    // Non-recursive: step_definitions/ lives below features/ but its churn
    // must not retrigger generation.
    watcher
        .watch(&features_dir, RecursiveMode::NonRecursive)
        .context("failed to watch features directory")?;

    println!("Watching: {}", features_dir.display());
    println!("Auto-sync enabled for step definitions and documentation.");
    println!("Press Ctrl+C to stop.\n");

    while !stop.load(Ordering::Relaxed) {
        let event = match rx.recv_timeout(Duration::from_millis(200)) {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => {
                tracing::warn!("watcher error: {e}");
                continue;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                anyhow::bail!("watcher channel disconnected");
            }
        };

        for path in &event.paths {
            let Some(id) = feature_id_for(&features_dir, path) else {
                continue;
            };
            match event.kind {
                EventKind::Create(_) => handle_added(&store, &config, &id),
                EventKind::Modify(_) => handle_changed(&store, &config, &id),
                EventKind::Remove(_) => handle_removed(&store, &id),
                _ => {}
            }
        }
    }

    println!("\nStopping file watcher...");
    drop(watcher);
    Ok(())
}

/// Extract the feature identifier from an event path, or None when the event
/// is not a `*.feature` file directly under the features directory.
fn feature_id_for(features_dir: &Path, path: &Path) -> Option<String> {
    if path.parent() != Some(features_dir) {
        return None;
    }
    let name = path.file_name()?.to_string_lossy();
    let id = name.strip_suffix(paths::FEATURE_SUFFIX)?;
    if id.is_empty() {
        return None;
    }
    Some(id.to_string())
}

fn settle(config: &Config) {
    // Let the editor finish writing before the runner reads the file.
    std::thread::sleep(Duration::from_millis(config.settle_ms));
}

fn handle_added(store: &FeatureStore, config: &Config, id: &str) {
    println!("feature added: {id}.feature");
    settle(config);
    generate_steps(store, config, id);
    match docs::generate_stubs(store) {
        Ok(written) if !written.is_empty() => {
            println!("  documentation created for {}", written.join(", "));
        }
        Ok(_) => {}
        Err(e) => println!("  failed to generate documentation for {id}: {e}"),
    }
}

fn handle_changed(store: &FeatureStore, config: &Config, id: &str) {
    println!("feature modified: {id}.feature");
    settle(config);
    generate_steps(store, config, id);
}

fn handle_removed(store: &FeatureStore, id: &str) {
    println!("feature deleted: {id}.feature");
    for kind in [ArtifactKind::Steps, ArtifactKind::Doc] {
        if store.exists(kind, id) {
            match store.delete(kind, id) {
                Ok(()) => println!("  removed {}", store.display_path(kind, id)),
                Err(e) => println!("  failed to remove {}: {e}", store.display_path(kind, id)),
            }
        }
    }
}

fn generate_steps(store: &FeatureStore, config: &Config, id: &str) {
    match steps::auto_generate(store, config) {
        Ok(report) if report.total() > 0 => {
            println!("  generated {} step definition(s)", report.total());
        }
        Ok(_) => println!("  step definitions up to date for {id}"),
        // Might just be the runner reporting pending steps; not fatal here.
        Err(e) => println!("  could not generate step definitions for {id}: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn accepts_feature_files_in_features_dir() {
        let dir = PathBuf::from("/proj/features");
        assert_eq!(
            feature_id_for(&dir, &dir.join("login.feature")).as_deref(),
            Some("login")
        );
    }

    #[test]
    fn rejects_step_definition_files() {
        let dir = PathBuf::from("/proj/features");
        assert!(feature_id_for(&dir, &dir.join("step_definitions/login.steps.js")).is_none());
    }

    #[test]
    fn rejects_non_feature_suffixes() {
        let dir = PathBuf::from("/proj/features");
        assert!(feature_id_for(&dir, &dir.join("notes.txt")).is_none());
        assert!(feature_id_for(&dir, &dir.join(".feature")).is_none());
    }

    #[test]
    fn rejects_nested_feature_files() {
        let dir = PathBuf::from("/proj/features");
        assert!(feature_id_for(&dir, &dir.join("sub/extra.feature")).is_none());
    }
}
