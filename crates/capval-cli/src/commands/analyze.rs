//! Analyze command implementation.
//!
//! Computes the viability metrics and recommendation for a project.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use capval_analytics::ViabilityReport;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::input::ProjectArgs;
use crate::output::{
    print_csv, print_json, print_output, print_recommendation, print_table, print_warning,
    recommendation_token,
};
use crate::report::{flow_rows, metric_rows, FlowRow};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Also show each period's flow and cumulative position
    #[arg(long)]
    pub flows_table: bool,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    #[serde(flatten)]
    report: &'a ViabilityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    flows: Option<Vec<FlowRow>>,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let (series, base) = args.project.parts()?;
    let analyzer = ctx.config.analyzer()?;
    let report = analyzer.analyze(&series, base)?;

    match ctx.format {
        OutputFormat::Table => {
            ctx.header("Project Viability");
            print_table(&metric_rows(&report))?;
            print_recommendation(report.recommendation);
            print_notes(&report);

            if args.flows_table {
                ctx.header("Cash Flows");
                print_table(&flow_rows(&series))?;
            }
        }
        OutputFormat::Json => {
            let output = AnalyzeOutput {
                report: &report,
                flows: args.flows_table.then(|| flow_rows(&series)),
            };
            print_json(&output)?;
        }
        OutputFormat::Csv => {
            if args.flows_table {
                print_csv(&flow_rows(&series))?;
            } else {
                print_output(&metric_rows(&report), OutputFormat::Csv)?;
            }
        }
        OutputFormat::Minimal => {
            println!("{}", recommendation_token(report.recommendation));
        }
    }

    Ok(())
}

/// Warnings about the IRR, on stderr.
pub fn print_notes(report: &ViabilityReport) {
    if let Some(note) = &report.irr_note {
        print_warning(&format!("IRR not available: {}", note));
    }
    if report.irr_ambiguous {
        print_warning("Cash flows change sign more than once; the IRR may not be unique");
    }
}
