//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod irr;
pub mod report;
pub mod sweep;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use irr::IrrArgs;
pub use report::ReportArgs;
pub use sweep::SweepArgs;

use std::path::PathBuf;

use capval_config::AnalysisConfig;

use crate::cli::OutputFormat;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress headers and informational lines.
    pub quiet: bool,
    /// Effective analysis configuration.
    pub config: AnalysisConfig,
    /// Explicit `--config` path, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Prints a section header unless quiet.
    pub fn header(&self, title: &str) {
        if !self.quiet {
            crate::output::print_header(title);
        }
    }
}
