mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::docs::DocsSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "featsync",
    about = "Keep BDD feature files, step definitions, and documentation in sync",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from features/ or .git/)
    #[arg(long, global = true, env = "FEATSYNC_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check feature/steps/docs synchronization
    Sync {
        /// Remove orphaned step-definition and documentation files
        #[arg(long)]
        clean: bool,
    },

    /// Run the test runner and generate missing step definitions
    Generate,

    /// Manage feature documentation
    Docs {
        #[command(subcommand)]
        subcommand: DocsSubcommand,
    },

    /// Rename a feature and its step-definition and documentation files
    Rename {
        /// Current feature identifier (e.g. user_login)
        old: String,
        /// New feature identifier (e.g. authentication)
        new: String,
    },

    /// Watch the features directory and regenerate on change
    Watch,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Watch => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Sync { clean } => cmd::sync::run(&root, clean, cli.json),
        Commands::Generate => cmd::generate::run(&root, cli.json),
        Commands::Docs { subcommand } => cmd::docs::run(&root, subcommand, cli.json),
        Commands::Rename { old, new } => cmd::rename::run(&root, &old, &new, cli.json),
        Commands::Watch => cmd::watch::run(&root),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
