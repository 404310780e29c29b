//! Internal rate of return.
//!
//! The IRR is the rate `r*` with `NPV(CF, r*) = 0`. It is found with the
//! bounded hybrid solver from `capval-math`: Newton-Raphson seeded at 10%
//! using the analytic derivative, falling back to bisection over
//! `[-0.99, 10.0]`.
//!
//! A series without a sign change has no IRR. A series with several sign
//! changes can have several; the solver returns whichever one it reaches
//! and flags the result as ambiguous.

use capval_core::{CashFlowSeries, ValuationError, ValuationResult};
use capval_math::error::MathError;
use capval_math::solvers::{hybrid, SolverConfig, SolverMethod};

use crate::npv::{discounted_slope, discounted_sum};

/// Default Newton seed.
pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;

/// Default lower end of the search interval.
pub const DEFAULT_LOWER_BOUND: f64 = -0.99;

/// Default upper end of the search interval.
pub const DEFAULT_UPPER_BOUND: f64 = 10.0;

/// Outcome of a successful IRR solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrResult {
    /// The internal rate of return as a fraction.
    pub rate: f64,
    /// Iterations used by the phase that converged.
    pub iterations: u32,
    /// NPV at `rate`.
    pub residual: f64,
    /// Phase that produced the root.
    pub method: SolverMethod,
    /// True when the series changes sign more than once.
    pub ambiguous: bool,
}

impl IrrResult {
    /// The rate as a percentage.
    pub fn as_percent(&self) -> f64 {
        self.rate * 100.0
    }
}

/// IRR solver with configurable tolerances, seed and search interval.
///
/// # Example
///
/// ```rust
/// use capval_analytics::irr::IrrSolver;
/// use capval_core::CashFlowSeries;
///
/// let series = CashFlowSeries::new(vec![-100.0, 110.0]).unwrap();
/// let result = IrrSolver::new().solve(&series).unwrap();
/// assert!((result.rate - 0.10).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IrrSolver {
    config: SolverConfig,
    initial_guess: f64,
    bounds: (f64, f64),
}

impl Default for IrrSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IrrSolver {
    /// Creates a solver with the default settings.
    ///
    /// Residual tolerance 1e-6, step tolerance 1e-7, 100 iterations,
    /// seed 0.10, interval `[-0.99, 10.0]`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
            initial_guess: DEFAULT_INITIAL_GUESS,
            bounds: (DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND),
        }
    }

    /// Replaces the tolerances and iteration cap.
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the Newton seed.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the search interval.
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = (lower, upper);
        self
    }

    /// Solver tolerances and iteration cap.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Newton seed.
    pub fn initial_guess(&self) -> f64 {
        self.initial_guess
    }

    /// Search interval.
    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    /// Solves for the IRR of `series`.
    ///
    /// # Errors
    ///
    /// - [`ValuationError::NoRoot`] when the series never changes sign
    /// - [`ValuationError::NoConvergence`] when both phases fail
    /// - [`ValuationError::InvalidInput`] when the solver settings are unusable
    pub fn solve(&self, series: &CashFlowSeries) -> ValuationResult<IrrResult> {
        self.check_settings()?;

        if !series.has_sign_change() {
            log::debug!("no sign change in {} periods, IRR undefined", series.periods());
            return Err(ValuationError::NoRoot);
        }

        let amounts = series.amounts();
        let f = |r: f64| discounted_sum(amounts, r);
        let df = |r: f64| discounted_slope(amounts, r);

        let result = hybrid(f, df, self.initial_guess, self.bounds, &self.config)
            .map_err(|err| self.to_valuation_error(err))?;

        let ambiguous = series.sign_changes() > 1;
        if ambiguous {
            log::debug!(
                "{} sign changes, IRR {:.6} may not be unique",
                series.sign_changes(),
                result.root
            );
        }
        log::debug!(
            "IRR {:.6} via {} in {} iterations",
            result.root,
            result.method,
            result.iterations
        );

        Ok(IrrResult {
            rate: result.root,
            iterations: result.iterations,
            residual: result.residual,
            method: result.method,
            ambiguous,
        })
    }

    fn check_settings(&self) -> ValuationResult<()> {
        let (lower, upper) = self.bounds;
        if !lower.is_finite() || !upper.is_finite() || lower <= -1.0 || lower >= upper {
            return Err(ValuationError::invalid_input(
                "bounds",
                format!("[{lower}, {upper}] must satisfy -1 < lower < upper"),
            ));
        }
        if !(lower..=upper).contains(&self.initial_guess) {
            return Err(ValuationError::invalid_input(
                "initial_guess",
                format!("{} is outside [{lower}, {upper}]", self.initial_guess),
            ));
        }
        Ok(())
    }

    fn to_valuation_error(&self, err: MathError) -> ValuationError {
        log::debug!("IRR solve failed: {err}");
        match err {
            MathError::ConvergenceFailed {
                iterations,
                residual,
            } => ValuationError::no_convergence(iterations, residual),
            MathError::InvalidBracket { fa, fb, .. } => {
                // sign change exists but no root inside the search interval
                ValuationError::no_convergence(0, fa.abs().min(fb.abs()))
            }
            MathError::OutOfBounds { .. }
            | MathError::Diverging { .. }
            | MathError::DivisionByZero { .. }
            | MathError::InvalidInput { .. } => {
                ValuationError::no_convergence(self.config.max_iterations, f64::NAN)
            }
        }
    }
}

/// IRR of `series` with the default solver.
///
/// Convenience wrapper over [`IrrSolver::solve`] returning only the rate.
pub fn irr(series: &CashFlowSeries) -> ValuationResult<f64> {
    IrrSolver::new().solve(series).map(|result| result.rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npv::npv;
    use approx::assert_relative_eq;

    fn series(amounts: &[f64]) -> CashFlowSeries {
        CashFlowSeries::new(amounts.to_vec()).unwrap()
    }

    #[test]
    fn test_single_period() {
        let result = IrrSolver::new().solve(&series(&[-100.0, 110.0])).unwrap();
        assert_relative_eq!(result.rate, 0.10, epsilon = 1e-7);
        assert_eq!(result.method, SolverMethod::Newton);
        assert!(!result.ambiguous);
    }

    #[test]
    fn test_even_inflows() {
        let cf = series(&[-50_000.0, 20_000.0, 20_000.0, 20_000.0, 20_000.0, 20_000.0]);
        let rate = irr(&cf).unwrap();
        assert_relative_eq!(rate, 0.286_493, epsilon = 1e-5);
        assert!(npv(&cf, rate).unwrap().abs() < 1e-4);
    }

    #[test]
    fn test_break_even_series_has_zero_irr() {
        let cf = series(&[-50_000.0, 10_000.0, 10_000.0, 10_000.0, 10_000.0, 10_000.0]);
        assert!(irr(&cf).unwrap().abs() < 1e-7);
    }

    #[test]
    fn test_no_sign_change() {
        let positive = series(&[100.0, 50.0, 60.0]);
        assert_eq!(irr(&positive).unwrap_err(), ValuationError::NoRoot);

        let shrinking = series(&[100.0, 50.0, 25.0]);
        assert_eq!(irr(&shrinking).unwrap_err(), ValuationError::NoRoot);

        let negative = series(&[-100.0, -10.0]);
        assert_eq!(irr(&negative).unwrap_err(), ValuationError::NoRoot);

        let zeros = series(&[0.0, 0.0]);
        assert_eq!(irr(&zeros).unwrap_err(), ValuationError::NoRoot);
    }

    #[test]
    fn test_root_outside_interval_does_not_converge() {
        // IRR of [-1, 100] is 9900%
        let err = irr(&series(&[-1.0, 100.0])).unwrap_err();
        assert!(matches!(err, ValuationError::NoConvergence { .. }));
    }

    #[test]
    fn test_multiple_sign_changes_flagged() {
        // roots at 10% and 20%
        let cf = series(&[-100.0, 230.0, -132.0]);
        let result = IrrSolver::new().solve(&cf).unwrap();
        assert!(result.ambiguous);
        assert!(npv(&cf, result.rate).unwrap().abs() < 1e-5);
        assert!(
            (result.rate - 0.10).abs() < 1e-5 || (result.rate - 0.20).abs() < 1e-5,
            "unexpected root {}",
            result.rate
        );
    }

    #[test]
    fn test_custom_bounds_and_seed() {
        let cf = series(&[-100.0, 60.0, 60.0]);
        let solver = IrrSolver::new()
            .with_initial_guess(0.5)
            .with_bounds(0.0, 1.0)
            .with_config(SolverConfig::default().with_tolerance(1e-9));
        let result = solver.solve(&cf).unwrap();
        // the first Newton step from 0.5 overshoots below zero
        assert_eq!(result.method, SolverMethod::Bisection);
        assert_relative_eq!(result.rate, 0.130_662, epsilon = 1e-5);
        assert!(result.residual.abs() < 1e-4);
    }

    #[test]
    fn test_invalid_settings() {
        let cf = series(&[-100.0, 110.0]);

        let err = IrrSolver::new().with_bounds(-1.5, 1.0).solve(&cf).unwrap_err();
        assert!(matches!(err, ValuationError::InvalidInput { field: "bounds", .. }));

        let err = IrrSolver::new().with_initial_guess(20.0).solve(&cf).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::InvalidInput {
                field: "initial_guess",
                ..
            }
        ));
    }

    #[test]
    fn test_iteration_cap_bounds_work() {
        let cf = series(&[-100.0, 60.0, 60.0]);
        let solver = IrrSolver::new().with_config(SolverConfig::default().with_max_iterations(1));
        // one Newton step and one bisection step are not enough
        assert!(matches!(
            solver.solve(&cf).unwrap_err(),
            ValuationError::NoConvergence { .. }
        ));
    }
}
