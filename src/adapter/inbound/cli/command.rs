//! Command-line interface definitions.
//!
//! Defines the CLI structure for the dealsight application using `clap`.
//! The CLI scores a file of deals against the prediction service, asks it
//! for next-best actions, checks its health endpoint and manages
//! configuration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Deal win-probability scoring CLI
#[derive(Parser, Debug)]
#[command(name = "dealsight")]
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

/// Top-level subcommands for the dealsight CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a JSON file of deals and print one row per deal
    Score(ScoreArgs),

    /// Ask for the next best action on each deal in a JSON file
    Recommend(ScoreArgs),

    /// Check that the prediction service is reachable and healthy
    Check(ConfigPathArg),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `score` and `recommend`.
#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Path to a JSON array of deals
    pub deals: PathBuf,

    /// Path to configuration file
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Shared `--config` argument.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration template
    Init {
        /// Where to write the template
        #[arg(default_value_os_t = paths::default_config())]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show(ConfigPathArg),

    /// Validate a configuration file
    Validate(ConfigPathArg),
}
