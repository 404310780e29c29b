//! Capval CLI - Command-line interface for capital project viability analysis.
//!
//! # Usage
//!
//! ```bash
//! # Metrics and recommendation
//! capval analyze --investment 50000 --rate 10 --flows 20000,20000,20000,20000,20000
//!
//! # IRR only
//! capval irr --input project.json
//!
//! # NPV sensitivity around the base rate
//! capval sweep --input flows.csv --rate 8 --points 40 --width 5
//!
//! # Markdown report
//! capval report --input project.json --output report.md
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use capval_config::AnalysisConfig;

mod cli;
mod commands;
mod error;
mod input;
mod output;
mod report;

use cli::{Cli, Commands};
use commands::Context;

const LOG_TARGETS: [&str; 4] = ["capval", "capval_analytics", "capval_config", "capval_math"];

fn log_filter(verbose: u8, quiet: bool) -> EnvFilter {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect();
        EnvFilter::new(directives.join(","))
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table and JSON output stay clean
    tracing_subscriber::registry()
        .with(log_filter(cli.verbose, cli.quiet))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // `config` commands must work before the file exists
    let config = match (&cli.command, cli.config.as_deref()) {
        (Commands::Config(_), Some(path)) if !path.exists() => AnalysisConfig::default(),
        (_, path) => AnalysisConfig::load_or_default(path)?,
    };
    tracing::debug!("effective configuration: {:?}", config);

    let ctx = Context {
        format: cli.format,
        quiet: cli.quiet,
        config,
        config_path: cli.config,
    };

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &ctx)?,
        Commands::Irr(args) => commands::irr::execute(args, &ctx)?,
        Commands::Sweep(args) => commands::sweep::execute(args, &ctx)?,
        Commands::Report(args) => commands::report::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}
