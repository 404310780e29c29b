//! Report command implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use crate::commands::Context;
use crate::input::ProjectArgs;
use crate::output::print_success;
use crate::report::render_markdown;

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Write the Markdown report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the report command.
///
/// The report is always Markdown; `--format` does not apply.
pub fn execute(args: ReportArgs, ctx: &Context) -> Result<()> {
    let (series, base) = args.project.parts()?;
    let analyzer = ctx.config.analyzer()?;

    let report = analyzer.analyze(&series, base)?;
    let curve = analyzer.sensitivity(&series, base)?;
    let markdown = render_markdown(&series, &report, &curve);

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            fs::write(&path, markdown).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("report written to {}", path.display());
            if !ctx.quiet {
                print_success(&format!("Report written to {}", path.display()));
            }
        }
        None => print!("{}", markdown),
    }

    Ok(())
}
