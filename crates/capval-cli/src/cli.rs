//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands::{AnalyzeArgs, ConfigArgs, IrrArgs, ReportArgs, SweepArgs};

/// Capval - Capital project viability analytics CLI
#[derive(Parser)]
#[command(name = "capval")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "CAPVAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute NPV, IRR, payback, ROI and margin of safety with a recommendation
    Analyze(AnalyzeArgs),

    /// Solve for the internal rate of return only
    Irr(IrrArgs),

    /// Sweep NPV across discount rates around the base rate
    Sweep(SweepArgs),

    /// Write a Markdown viability report
    Report(ReportArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}
