//! ebl-lint CLI tool.
//!
//! Usage:
//! ```bash
//! ebl-lint check [OPTIONS] [PATH]
//! ebl-lint list-rules
//! ebl-lint init
//! ```
//!
//! Exit status: 0 when clean, 2 when any tree has errors, fails to load, or
//! has advisories at `fail_on`, 1 on operational failure.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ebl_lint_core::Severity;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod discover;

/// Semantic validator for EBL syntax trees
#[derive(Parser)]
#[command(name = "ebl-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "EBL_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate syntax tree files
    Check {
        /// Tree file or directory to validate (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Dictionary JSON (overrides `dictionary` in the config)
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Heuristics preset: none, banking, all
        #[arg(long)]
        heuristics: Option<String>,

        /// Do not warn about unknown relationship endpoints
        #[arg(long)]
        no_unknown_assets: bool,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Fail when advisories reach this severity
        #[arg(long)]
        fail_on: Option<FailOn>,
    },

    /// List available rules
    ListRules,

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
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
    /// Graphical diagnostics.
    Pretty,
}

/// Advisory severity threshold.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum FailOn {
    Info,
    Warning,
    Error,
}

impl From<FailOn> for Severity {
    fn from(value: FailOn) -> Self {
        match value {
            FailOn::Info => Self::Info,
            FailOn::Warning => Self::Warning,
            FailOn::Error => Self::Error,
        }
    }
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

    match cli.command {
        Commands::Check {
            path,
            dictionary,
            format,
            heuristics,
            no_unknown_assets,
            exclude,
            fail_on,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            let opts = commands::check::CheckOptions {
                path,
                dictionary,
                format,
                heuristics,
                no_unknown_assets,
                exclude,
                fail_on: fail_on.map(Severity::from),
            };
            commands::check::run(opts, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
