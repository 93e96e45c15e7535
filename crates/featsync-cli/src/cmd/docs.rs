use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use featsync_core::config::Config;
use featsync_core::docs::{self, DocsReport};
use featsync_core::store::FeatureStore;
use std::path::Path;

#[derive(Subcommand)]
pub enum DocsSubcommand {
    /// Create documentation stubs for undocumented features
    Generate,
    /// Report documentation coverage and framework-doc status
    Check,
}

pub fn run(root: &Path, subcmd: DocsSubcommand, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load featsync.yaml")?;
    let store = FeatureStore::new(root, &config.steps_ext);

    match subcmd {
        DocsSubcommand::Generate => generate(root, &store, json),
        DocsSubcommand::Check => check(&store, json),
    }
}

fn generate(root: &Path, store: &FeatureStore, json: bool) -> anyhow::Result<()> {
    let written = docs::generate_stubs(store).context("failed to generate documentation stubs")?;

    if json {
        return print_json(&written);
    }

    if written.is_empty() {
        println!("All features have documentation.");
    } else {
        for id in &written {
            println!("  generated documentation stub: docs/features/{id}.md");
        }
        println!("Generated {} documentation stub(s).", written.len());
        println!("Please fill in the feature details in docs/features/.");
    }

    let files = docs::list_doc_files(root)?;
    if !files.is_empty() {
        println!("\nCurrent feature documentation files:");
        for file in files {
            println!("  - docs/features/{file}");
        }
    }

    Ok(())
}

fn check(store: &FeatureStore, json: bool) -> anyhow::Result<()> {
    let report = DocsReport::check(store).context("failed to check documentation status")?;

    if json {
        return print_json(&report);
    }

    println!("Documentation status report");
    println!("===========================\n");

    println!("Feature documentation:");
    for id in &report.documented {
        println!("  ok      {id}.feature -> docs/features/{id}.md");
    }
    for id in &report.missing {
        println!("  missing {id}.feature -> no documentation");
    }
    if !report.orphaned.is_empty() {
        println!("  Orphaned documentation (no corresponding feature):");
        for id in &report.orphaned {
            println!("    docs/features/{id}.md");
        }
    }
    let total = report.documented.len() + report.missing.len();
    println!(
        "  Coverage: {}/{} features documented ({}%)\n",
        report.documented.len(),
        total,
        report.coverage_percent()
    );

    println!("Framework documentation:");
    for doc in &report.framework {
        let mark = if doc.exists { "ok     " } else { "missing" };
        println!(
            "  {mark} {} - {} ({})",
            doc.file, doc.description, doc.status
        );
    }

    println!("\nSummary:");
    let yn = |b: bool| if b { "ok" } else { "missing" };
    println!("  {} documentation index (docs/README.md)", yn(report.has_docs_index));
    println!("  {} project README", yn(report.has_project_readme));
    println!(
        "  {} AI assistant instructions (.instructions.md)",
        yn(report.has_ai_instructions)
    );

    println!("\nNext steps:");
    println!("  - run `featsync docs generate` to create missing feature documentation");
    println!("  - review and complete planned framework documentation");
    println!("  - keep documentation updated as features are added or modified");

    Ok(())
}
