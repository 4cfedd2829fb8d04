//! styleconf - configuration resolver for utility-first stylesheet build tools
//!
//! Discovers the project's `styleconf.config.{yaml,yml,json}`, layers it over
//! the defaults and prints or validates the resolved result.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use styleconf::cli::{self, Command};
use styleconf::config::ConfigLoader;

/// styleconf - resolve and validate styling configuration
#[derive(Parser, Debug)]
#[command(name = "styleconf")]
#[command(about = "Resolve and validate styling-framework configuration", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Directory to start config discovery from (defaults to the current directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Explicit config file, skips discovery
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    cli::init_logging(args.debug);
    tracing::debug!("Debug logging enabled");

    let start_dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let loader = ConfigLoader::new().with_config_file(args.config);

    cli::handle_command(args.command, &loader, &start_dir)
}
