//! Command-line interface for the demo driver

use std::path::PathBuf;

use clap::Parser;

/// Drive the task stores through a scripted event sequence
#[derive(Debug, Parser)]
#[command(name = "tf", version, about)]
pub struct Cli {
    /// Path to a YAML config file (default: ./.taskflow.yml, then built-ins)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
