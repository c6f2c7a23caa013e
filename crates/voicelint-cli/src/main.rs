//! voicelint CLI tool.
//!
//! Usage:
//! ```bash
//! voicelint validate [OPTIONS] [TEXT]
//! voicelint rewrite [OPTIONS] [TEXT]
//! voicelint test [--pack P]
//! voicelint packs
//! voicelint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Brand voice linter for product and marketing copy
#[derive(Parser)]
#[command(name = "voicelint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check text against a pack
    Validate(commands::validate::Args),

    /// Apply the fixes a pack can express
    Rewrite(commands::rewrite::Args),

    /// Run a pack's own test cases
    Test(commands::test::Args),

    /// List available packs and context routing
    Packs,

    /// Show a pack or one of its sections
    Inspect(commands::inspect::Args),

    /// Pick a pack for a text by its content context
    Select(commands::select::Args),

    /// List built-in rules
    Rules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for validation results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Source-annotated diagnostics.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

/// Output format for reports without a compact form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Validate(args) => commands::validate::run(args, config),
        Commands::Rewrite(args) => commands::rewrite::run(args, config),
        Commands::Test(args) => commands::test::run(&args, config),
        Commands::Packs => commands::packs::run(config),
        Commands::Inspect(args) => commands::inspect::run(&args, config),
        Commands::Select(args) => commands::select::run(args, config),
        Commands::Rules => {
            commands::rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
