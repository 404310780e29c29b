//! Capval Configuration Layer
//!
//! Analysis settings for the Capval project viability library, stored as a
//! TOML file under the platform configuration directory.
//!
//! # Features
//!
//! - **Solver Settings**: IRR seed, tolerances, iteration cap, search interval
//! - **Sensitivity Settings**: Grid size and half-width around the base rate
//! - **Recommendation Settings**: Policy for projects without an IRR
//! - **Validation**: Every setting checked before an analyzer is built
//!
//! # Example
//!
//! ```rust
//! use capval_config::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! let analyzer = config.analyzer().unwrap();
//! assert_eq!(analyzer.sweep().points(), 20);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod error;

pub use analysis::{
    default_path, AnalysisConfig, RecommendationSettings, SensitivitySettings, SolverSettings,
};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
