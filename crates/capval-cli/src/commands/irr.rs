//! IRR command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use capval_analytics::IrrResult;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::input::ProjectArgs;
use crate::output::{
    format_percent, print_json, print_output, print_table, print_warning, KeyValue, NOT_AVAILABLE,
};

/// Arguments for the irr command.
#[derive(Args, Debug)]
pub struct IrrArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Override the solver's initial guess (percent)
    #[arg(long)]
    pub guess: Option<f64>,
}

/// Machine-readable IRR outcome.
#[derive(Debug, Serialize)]
struct IrrOutput {
    irr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    irr_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iterations: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    residual: Option<f64>,
    ambiguous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl IrrOutput {
    fn solved(result: &IrrResult) -> Self {
        Self {
            irr: Some(result.rate),
            irr_percent: Some(result.as_percent()),
            method: Some(result.method.to_string()),
            iterations: Some(result.iterations),
            residual: Some(result.residual),
            ambiguous: result.ambiguous,
            reason: None,
        }
    }

    fn unavailable(reason: String) -> Self {
        Self {
            irr: None,
            irr_percent: None,
            method: None,
            iterations: None,
            residual: None,
            ambiguous: false,
            reason: Some(reason),
        }
    }

    fn rows(&self) -> Vec<KeyValue> {
        let Some(percent) = self.irr_percent else {
            return vec![
                KeyValue::new("IRR", NOT_AVAILABLE),
                KeyValue::new("Reason", self.reason.clone().unwrap_or_default()),
            ];
        };

        let mut rows = vec![KeyValue::new("IRR", format_percent(percent))];
        if let Some(method) = &self.method {
            rows.push(KeyValue::new("Method", method.clone()));
        }
        if let Some(iterations) = self.iterations {
            rows.push(KeyValue::new("Iterations", iterations.to_string()));
        }
        if let Some(residual) = self.residual {
            rows.push(KeyValue::new("NPV at IRR", format!("{:.3e}", residual)));
        }
        rows.push(KeyValue::new(
            "Multiple sign changes",
            if self.ambiguous { "yes" } else { "no" },
        ));
        rows
    }
}

/// Execute the irr command.
pub fn execute(args: IrrArgs, ctx: &Context) -> Result<()> {
    let series = args.project.series()?;

    let mut solver = ctx.config.solver.irr_solver();
    if let Some(guess) = args.guess {
        solver = solver.with_initial_guess(guess / 100.0);
    }

    let output = match solver.solve(&series) {
        Ok(result) => IrrOutput::solved(&result),
        Err(err) if err.is_undefined_metric() => {
            tracing::info!("IRR not available: {}", err);
            IrrOutput::unavailable(err.to_string())
        }
        Err(err) => return Err(err.into()),
    };

    match ctx.format {
        OutputFormat::Table => {
            ctx.header("Internal Rate of Return");
            print_table(&output.rows())?;
            if output.ambiguous {
                print_warning("Cash flows change sign more than once; the IRR may not be unique");
            }
        }
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Csv => print_output(&output.rows(), OutputFormat::Csv)?,
        OutputFormat::Minimal => match output.irr_percent {
            Some(percent) => println!("{}", format_percent(percent)),
            None => println!("{}", NOT_AVAILABLE),
        },
    }

    Ok(())
}
