//! Sensitivity sweep command implementation.

use anyhow::Result;
use clap::Args;

use capval_config::SensitivitySettings;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::input::ProjectArgs;
use crate::output::{format_rate, print_csv, print_info, print_json, print_table};
use crate::report::sweep_rows;

/// Arguments for the sweep command.
#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Number of grid points (overrides the configuration)
    #[arg(long)]
    pub points: Option<usize>,

    /// Half-width of the rate window in percentage points (overrides the configuration)
    #[arg(long)]
    pub width: Option<f64>,
}

impl SweepArgs {
    /// Applies the overrides to the configured settings, with the same limits.
    fn settings(&self, ctx: &Context) -> SensitivitySettings {
        let configured = ctx.config.sensitivity;
        SensitivitySettings {
            points: self.points.unwrap_or(configured.points),
            half_width: self.width.map_or(configured.half_width, |w| w / 100.0),
        }
    }
}

/// Execute the sweep command.
pub fn execute(args: SweepArgs, ctx: &Context) -> Result<()> {
    let (series, base) = args.project.parts()?;
    let curve = args.settings(ctx).sweep()?.run(&series, base)?;

    match ctx.format {
        OutputFormat::Table => {
            ctx.header(&format!("NPV Sensitivity around {}", base));
            print_table(&sweep_rows(&curve))?;
            if !ctx.quiet {
                match curve.break_even_estimate() {
                    Some(rate) => {
                        print_info(&format!("NPV crosses zero near {}", format_rate(rate)));
                    }
                    None => print_info("NPV does not change sign within the window"),
                }
            }
        }
        OutputFormat::Json => print_json(&curve)?,
        OutputFormat::Csv => print_csv(&curve.points)?,
        OutputFormat::Minimal => {
            for point in &curve.points {
                println!("{:.6} {:.2}", point.rate, point.npv);
            }
        }
    }

    Ok(())
}
