//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// jobstats - Relevance filtering and market statistics for job listings
#[derive(Parser, Debug)]
#[command(name = "jobstats")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human, json, plain)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Enable machine-readable JSON output (shorthand for --output-format=json)
    #[arg(long, short = 'm', global = true)]
    pub machine: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/jobstats/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective output format.
    ///
    /// Priority order:
    /// 1. `--output-format`
    /// 2. `--machine`
    /// 3. `format` from configuration, when it names a known format
    /// 4. Human
    #[must_use]
    pub fn output_format(&self, configured: &str) -> OutputFormat {
        if let Some(fmt) = self.output_format {
            return fmt;
        }
        if self.machine {
            return OutputFormat::Json;
        }
        OutputFormat::from_name(configured).unwrap_or_default()
    }

    /// Whether errors should be reported as JSON on stdout. Decided from
    /// flags alone so it also holds when configuration fails to load.
    #[must_use]
    pub fn machine_errors(&self) -> bool {
        self.machine || self.output_format == Some(OutputFormat::Json)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep only listings relevant to a keyword
    Filter(commands::filter::FilterArgs),

    /// Merge batches and compute market statistics
    Stats(commands::stats::StatsArgs),

    /// Merge batches into unique listings
    Dedup(commands::dedup::DedupArgs),

    /// Show effective configuration
    Config(commands::config::ConfigArgs),
}
