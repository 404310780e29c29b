//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: quadratic convergence when a derivative is available,
//!   optionally confined to an interval
//! - [`bisection`]: slow but guaranteed once a sign change is bracketed
//! - [`hybrid`]: Newton-Raphson confined to an interval, falling back to
//!   bisection over that interval when Newton fails
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Hybrid | Fast | Guaranteed* | Derivative + interval |
//!
//! *When the interval brackets a sign change.
//!
//! # Example: Internal Rate of Return
//!
//! ```rust
//! use capval_math::solvers::{hybrid, SolverConfig};
//!
//! // -100 today, 60 in each of the next two periods
//! let flows = [-100.0, 60.0, 60.0];
//! let npv = |r: f64| {
//!     flows
//!         .iter()
//!         .enumerate()
//!         .map(|(t, cf)| cf / (1.0 + r).powi(t as i32))
//!         .sum::<f64>()
//! };
//! let d_npv = |r: f64| {
//!     flows
//!         .iter()
//!         .enumerate()
//!         .map(|(t, cf)| -(t as f64) * cf / (1.0 + r).powi(t as i32 + 1))
//!         .sum::<f64>()
//! };
//!
//! let result = hybrid(npv, d_npv, 0.1, (-0.99, 10.0), &SolverConfig::default()).unwrap();
//! assert!(npv(result.root).abs() < 1e-6);
//! ```

mod bisection;
mod hybrid;
mod newton;

pub use bisection::bisection;
pub use hybrid::hybrid;
pub use newton::newton_raphson;

use std::fmt;

/// Default residual tolerance: `|f(x)|` below this is a root.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default step tolerance: a step `|Δx|` below this is converged.
pub const DEFAULT_STEP_TOLERANCE: f64 = 1e-7;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Residual tolerance on `|f(x)|`.
    pub tolerance: f64,
    /// Step tolerance on `|Δx|` (or half the bracket width for bisection).
    pub step_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            step_tolerance: DEFAULT_STEP_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, step_tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            step_tolerance,
            max_iterations,
        }
    }

    /// Sets the residual tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the step tolerance.
    #[must_use]
    pub fn with_step_tolerance(mut self, step_tolerance: f64) -> Self {
        self.step_tolerance = step_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Which algorithm produced a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverMethod {
    /// Newton-Raphson iteration.
    Newton,
    /// Interval bisection.
    Bisection,
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverMethod::Newton => write!(f, "Newton-Raphson"),
            SolverMethod::Bisection => write!(f, "Bisection"),
        }
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
    /// Algorithm that produced the root.
    pub method: SolverMethod,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn npv(flows: &[f64], r: f64) -> f64 {
        flows
            .iter()
            .enumerate()
            .map(|(t, cf)| cf / (1.0 + r).powi(t as i32))
            .sum()
    }

    fn d_npv(flows: &[f64], r: f64) -> f64 {
        flows
            .iter()
            .enumerate()
            .map(|(t, cf)| -(t as f64) * cf / (1.0 + r).powi(t as i32 + 1))
            .sum()
    }

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_step_tolerance(1e-9)
            .with_max_iterations(50);

        assert_relative_eq!(config.tolerance, 1e-8);
        assert_relative_eq!(config.step_tolerance, 1e-9);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = SolverConfig::default();
        assert_relative_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert_relative_eq!(config.step_tolerance, DEFAULT_STEP_TOLERANCE);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_newton_and_bisection_agree_on_project_irr() {
        let flows = [-50_000.0, 20_000.0, 20_000.0, 20_000.0, 20_000.0, 20_000.0];
        let f = |r: f64| npv(&flows, r);
        let df = |r: f64| d_npv(&flows, r);
        let config = SolverConfig::default();

        let newton = newton_raphson(f, df, 0.1, None, &config).unwrap();
        let bisect = bisection(f, -0.99, 10.0, &config).unwrap();

        assert_relative_eq!(newton.root, bisect.root, epsilon = 1e-6);
        assert_eq!(newton.method, SolverMethod::Newton);
        assert_eq!(bisect.method, SolverMethod::Bisection);
    }

    #[test]
    fn test_newton_uses_fewer_iterations() {
        let flows = [-1_000.0, 300.0, 400.0, 500.0];
        let f = |r: f64| npv(&flows, r);
        let df = |r: f64| d_npv(&flows, r);
        let config = SolverConfig::default();

        let newton = newton_raphson(f, df, 0.1, None, &config).unwrap();
        let bisect = bisection(f, -0.99, 10.0, &config).unwrap();

        assert!(newton.iterations <= bisect.iterations);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(SolverMethod::Newton.to_string(), "Newton-Raphson");
        assert_eq!(SolverMethod::Bisection.to_string(), "Bisection");
    }
}
