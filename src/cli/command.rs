//! Command-line interface definitions.
//!
//! Defines the CLI structure for the oddsflow application using `clap`.
//! The CLI supports subcommands for running the batch over a data
//! directory, inspecting one market's odds series, and managing
//! configuration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Cohort;

use super::paths;

/// Investment-weighted odds estimation for binary prediction markets
#[derive(Parser, Debug)]
#[command(name = "oddsflow")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the oddsflow CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process every market under the data directory and write odds tables
    Run(RunArgs),

    /// Compute and display one market's odds series
    Show(ShowArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `oddsflow config`.
///
/// Provides configuration management utilities including generation,
/// display, and validation of configuration files.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Cohort selector for the `show` command.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum CohortArg {
    /// Every trader with a position (synthetic cohort)
    #[default]
    All,
    Large,
    Medium,
    Small,
}

impl From<CohortArg> for Cohort {
    fn from(arg: CohortArg) -> Self {
        match arg {
            CohortArg::All => Cohort::All,
            CohortArg::Large => Cohort::Large,
            CohortArg::Medium => Cohort::Medium,
            CohortArg::Small => Cohort::Small,
        }
    }
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `run` subcommand.
///
/// All optional fields override the corresponding configuration file values.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Override the trade-log directory (one subdirectory per event).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Override the output-table directory.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Override the cohort-assignment table path.
    #[arg(long)]
    pub cohorts: Option<PathBuf>,

    /// Worker count for the market pool (default: one per CPU).
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Event directory name under the data directory.
    pub event: String,

    /// Market identifier (the `<market_id>_trades.csv` prefix).
    pub market: String,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Override the trade-log directory.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Override the cohort-assignment table path.
    #[arg(long)]
    pub cohorts: Option<PathBuf>,

    /// Cohort to display.
    #[arg(long, default_value = "all", hide_possible_values = true)]
    pub cohort: CohortArg,
}
