//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

use capval_config::ConfigError;
use capval_core::ValuationError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Discount rate outside the accepted percentage range.
    #[error("Invalid discount rate: {0}%. Must be between 0 and 100.")]
    InvalidRate(f64),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Input file content that cannot form a project.
    #[error("Invalid input file {}: {message}", .path.display())]
    InvalidFile {
        /// File being read.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// Input file with an extension other than .json or .csv.
    #[error("Unsupported input file {}: expected a .json or .csv file", .0.display())]
    UnsupportedFile(PathBuf),

    /// Project figures rejected by validation.
    #[error(transparent)]
    Valuation(#[from] ValuationError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Refusing to overwrite an existing file.
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
