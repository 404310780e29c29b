//! Analysis configuration.
//!
//! Solver, sensitivity and recommendation settings read from a TOML file:
//!
//! ```toml
//! [solver]
//! initial_guess = 0.1
//! tolerance = 1e-6
//! step_tolerance = 1e-7
//! max_iterations = 100
//! lower_bound = -0.99
//! upper_bound = 10.0
//!
//! [sensitivity]
//! points = 20
//! half_width = 0.1
//!
//! [recommendation]
//! policy = "npv-only"
//! ```
//!
//! Every key is optional and falls back to the default shown.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use capval_analytics::{IrrSolver, SensitivitySweep, ViabilityAnalyzer};
use capval_core::RecommendationPolicy;
use capval_math::solvers::SolverConfig;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Directory under the platform config dir holding the config file.
pub const CONFIG_DIR_NAME: &str = "capval";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// SOLVER SETTINGS
// =============================================================================

/// IRR solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSettings {
    /// Newton seed.
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,

    /// Residual tolerance on `|NPV|`.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Step tolerance on `|Δr|`.
    #[serde(default = "default_step_tolerance")]
    pub step_tolerance: f64,

    /// Iteration cap for each solver phase.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Lower end of the search interval.
    #[serde(default = "default_lower_bound")]
    pub lower_bound: f64,

    /// Upper end of the search interval.
    #[serde(default = "default_upper_bound")]
    pub upper_bound: f64,
}

fn default_initial_guess() -> f64 {
    capval_analytics::irr::DEFAULT_INITIAL_GUESS
}

fn default_tolerance() -> f64 {
    capval_math::solvers::DEFAULT_TOLERANCE
}

fn default_step_tolerance() -> f64 {
    capval_math::solvers::DEFAULT_STEP_TOLERANCE
}

fn default_max_iterations() -> u32 {
    capval_math::solvers::DEFAULT_MAX_ITERATIONS
}

fn default_lower_bound() -> f64 {
    capval_analytics::irr::DEFAULT_LOWER_BOUND
}

fn default_upper_bound() -> f64 {
    capval_analytics::irr::DEFAULT_UPPER_BOUND
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            initial_guess: default_initial_guess(),
            tolerance: default_tolerance(),
            step_tolerance: default_step_tolerance(),
            max_iterations: default_max_iterations(),
            lower_bound: default_lower_bound(),
            upper_bound: default_upper_bound(),
        }
    }
}

impl SolverSettings {
    /// Tolerances and iteration cap as a solver config.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.step_tolerance, self.max_iterations)
    }

    /// IRR solver built from these settings.
    pub fn irr_solver(&self) -> IrrSolver {
        IrrSolver::new()
            .with_config(self.solver_config())
            .with_initial_guess(self.initial_guess)
            .with_bounds(self.lower_bound, self.upper_bound)
    }
}

impl Validate for SolverSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.tolerance > 0.0 && self.tolerance <= 1e-2) {
            errors.push(ValidationError::with_rule(
                "solver.tolerance",
                "Tolerance must be in (0, 1e-2]",
                "valid_tolerance",
            ));
        }

        if !(self.step_tolerance > 0.0 && self.step_tolerance <= 1e-2) {
            errors.push(ValidationError::with_rule(
                "solver.step_tolerance",
                "Step tolerance must be in (0, 1e-2]",
                "valid_tolerance",
            ));
        }

        if self.max_iterations == 0 || self.max_iterations > 10_000 {
            errors.push(ValidationError::with_rule(
                "solver.max_iterations",
                "Max iterations must be between 1 and 10000",
                "valid_iterations",
            ));
        }

        if !self.lower_bound.is_finite() || self.lower_bound <= -1.0 {
            errors.push(ValidationError::with_rule(
                "solver.lower_bound",
                format!("Lower bound {} must be greater than -1", self.lower_bound),
                "valid_bounds",
            ));
        }

        if !self.upper_bound.is_finite() || self.upper_bound <= self.lower_bound {
            errors.push(ValidationError::with_rule(
                "solver.upper_bound",
                format!(
                    "Upper bound {} must exceed lower bound {}",
                    self.upper_bound, self.lower_bound
                ),
                "valid_bounds",
            ));
        }

        if !(self.initial_guess > self.lower_bound && self.initial_guess < self.upper_bound) {
            errors.push(ValidationError::with_rule(
                "solver.initial_guess",
                format!(
                    "Initial guess {} must lie strictly inside [{}, {}]",
                    self.initial_guess, self.lower_bound, self.upper_bound
                ),
                "guess_in_bounds",
            ));
        }

        errors
    }
}

// =============================================================================
// SENSITIVITY SETTINGS
// =============================================================================

/// Sensitivity sweep settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensitivitySettings {
    /// Number of grid points.
    #[serde(default = "default_points")]
    pub points: usize,

    /// Half-width of the grid around the base rate, as a fraction.
    #[serde(default = "default_half_width")]
    pub half_width: f64,
}

fn default_points() -> usize {
    capval_analytics::sensitivity::DEFAULT_POINTS
}

fn default_half_width() -> f64 {
    capval_analytics::sensitivity::DEFAULT_HALF_WIDTH
}

impl Default for SensitivitySettings {
    fn default() -> Self {
        Self {
            points: default_points(),
            half_width: default_half_width(),
        }
    }
}

impl SensitivitySettings {
    /// Validates the settings and builds the sweep.
    pub fn sweep(&self) -> ConfigResult<SensitivitySweep> {
        self.validate_or_error()?;
        SensitivitySweep::new(self.points, self.half_width).map_err(|err| {
            ConfigError::Validation {
                field: "sensitivity".to_string(),
                message: err.to_string(),
            }
        })
    }
}

impl Validate for SensitivitySettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(2..=500).contains(&self.points) {
            errors.push(ValidationError::with_rule(
                "sensitivity.points",
                format!("Points {} must be between 2 and 500", self.points),
                "valid_points",
            ));
        }

        if !(self.half_width > 0.0 && self.half_width <= 1.0) {
            errors.push(ValidationError::with_rule(
                "sensitivity.half_width",
                format!("Half-width {} must be in (0, 1]", self.half_width),
                "valid_half_width",
            ));
        }

        errors
    }
}

// =============================================================================
// RECOMMENDATION SETTINGS
// =============================================================================

/// Recommendation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationSettings {
    /// Treatment of an undefined IRR.
    #[serde(default)]
    pub policy: RecommendationPolicy,
}

// =============================================================================
// ANALYSIS CONFIGURATION
// =============================================================================

/// Complete analysis configuration.
///
/// # Example
///
/// ```rust
/// use capval_config::{AnalysisConfig, Validate};
/// use capval_core::RecommendationPolicy;
///
/// let config = AnalysisConfig::from_toml_str(
///     r#"
///     [sensitivity]
///     points = 11
///
///     [recommendation]
///     policy = "require-irr"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.sensitivity.points, 11);
/// assert_eq!(config.recommendation.policy, RecommendationPolicy::RequireIrr);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// IRR solver settings.
    #[serde(default)]
    pub solver: SolverSettings,

    /// Sensitivity sweep settings.
    #[serde(default)]
    pub sensitivity: SensitivitySettings,

    /// Recommendation settings.
    #[serde(default)]
    pub recommendation: RecommendationSettings,
}

impl AnalysisConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reads, parses and validates a config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, else the default file when it exists, else
    /// the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                log::debug!("no configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let text = self.to_toml_string()?;
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, text).map_err(io_err)?;
        log::debug!("saved configuration to {}", path.display());
        Ok(())
    }

    /// Analyzer wired with these settings.
    pub fn analyzer(&self) -> ConfigResult<ViabilityAnalyzer> {
        self.validate_or_error()?;
        Ok(ViabilityAnalyzer::new()
            .with_solver(self.solver.irr_solver())
            .with_sweep(self.sensitivity.sweep()?)
            .with_policy(self.recommendation.policy))
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.solver.validate();
        errors.extend(self.sensitivity.validate());
        errors
    }
}

/// Platform location of the config file, e.g.
/// `~/.config/capval/config.toml` on Linux.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
