//! Config command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use capval_config::{default_path, AnalysisConfig, ConfigError};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{print_info, print_json, print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Show the configuration file path
    Path,

    /// Write the default configuration to the configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(ctx),
        ConfigAction::Path => show_path(ctx),
        ConfigAction::Init { force } => init_config(ctx, force),
    }
}

fn config_rows(config: &AnalysisConfig) -> Vec<KeyValue> {
    let solver = &config.solver;
    vec![
        KeyValue::new("solver.initial_guess", solver.initial_guess.to_string()),
        KeyValue::new("solver.tolerance", format!("{:e}", solver.tolerance)),
        KeyValue::new("solver.step_tolerance", format!("{:e}", solver.step_tolerance)),
        KeyValue::new("solver.max_iterations", solver.max_iterations.to_string()),
        KeyValue::new("solver.lower_bound", solver.lower_bound.to_string()),
        KeyValue::new("solver.upper_bound", solver.upper_bound.to_string()),
        KeyValue::new("sensitivity.points", config.sensitivity.points.to_string()),
        KeyValue::new("sensitivity.half_width", config.sensitivity.half_width.to_string()),
        KeyValue::new("recommendation.policy", config.recommendation.policy.to_string()),
    ]
}

fn show_config(ctx: &Context) -> Result<()> {
    match ctx.format {
        OutputFormat::Table => {
            ctx.header("Configuration");
            print_output(&config_rows(&ctx.config), OutputFormat::Table)?;
        }
        OutputFormat::Json => print_json(&ctx.config)?,
        OutputFormat::Csv => print_output(&config_rows(&ctx.config), OutputFormat::Csv)?,
        OutputFormat::Minimal => print!("{}", ctx.config.to_toml_string()?),
    }
    Ok(())
}

fn target_path(ctx: &Context) -> Result<PathBuf, ConfigError> {
    ctx.config_path
        .clone()
        .or_else(default_path)
        .ok_or(ConfigError::NoConfigDir)
}

fn show_path(ctx: &Context) -> Result<()> {
    let path = target_path(ctx)?;
    let status = if path.exists() { "exists" } else { "not created" };
    if ctx.format == OutputFormat::Minimal {
        println!("{}", path.display());
    } else {
        print_info(&format!("Config path: {} ({})", path.display(), status));
    }
    Ok(())
}

fn init_config(ctx: &Context, force: bool) -> Result<()> {
    let path = target_path(ctx)?;
    if path.exists() && !force {
        return Err(CliError::AlreadyExists(path).into());
    }

    AnalysisConfig::default().save(&path)?;
    tracing::info!("wrote default configuration to {}", path.display());
    if !ctx.quiet {
        print_success(&format!("Default configuration written to {}", path.display()));
    }
    Ok(())
}
