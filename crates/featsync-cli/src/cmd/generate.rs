use crate::output::print_json;
use anyhow::Context;
use featsync_core::config::Config;
use featsync_core::steps;
use featsync_core::store::FeatureStore;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load featsync.yaml")?;
    let store = FeatureStore::new(root, &config.steps_ext);

    if !json {
        println!("Checking for undefined step definitions...");
    }

    let report = steps::auto_generate(&store, &config)
        .context("failed to generate step definitions")?;

    if json {
        return print_json(&report);
    }

    if !report.had_undefined {
        println!("All step definitions are already defined.");
        if report.has_pending {
            println!("Some steps are pending - you can now implement their logic.");
        }
        return Ok(());
    }

    for (id, appended) in &report.generated {
        if *appended > 0 {
            println!("  generated {appended} step(s) in {id}.steps.{}", config.steps_ext);
        } else {
            println!("  all steps for {id} are already defined");
        }
    }

    let total = report.total();
    if total > 0 {
        println!(
            "Generated {total} step definition(s) across {} feature file(s).",
            report.generated.len()
        );
        println!("Don't forget to implement the step logic.");
    } else {
        println!("All step definitions are already defined.");
    }

    Ok(())
}
