//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Overrides for the configuration file.
#[derive(Debug, Clone, Parser)]
#[command(name = "worldboss", version, about = "World boss service demo host")]
pub struct CliArgs {
    /// Configuration file path. Created with defaults if missing.
    #[arg(short, long = "config", value_name = "FILE", default_value = "worldboss.toml")]
    pub config_path: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    pub json_logs: bool,

    /// RNG seed for the boss service
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Number of scripted players
    #[arg(long)]
    pub players: Option<usize>,
}
