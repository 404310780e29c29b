//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverMethod, SolverResult};

/// Smallest derivative magnitude a Newton step will divide by.
const MIN_DERIVATIVE: f64 = 1e-15;

/// Consecutive residual blow-ups tolerated before the iteration is abandoned.
const MAX_DIVERGENCE: u32 = 3;

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// Stops when `|f(x)| < config.tolerance` or `|Δx| < config.step_tolerance`.
/// Fails fast when the derivative vanishes, the residual keeps growing, or,
/// with `bounds` given, an iterate leaves the closed interval.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `bounds` - Optional `(lower, upper)` interval the iterates must stay in
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use capval_math::solvers::{newton_raphson, SolverConfig};
///
/// // -100 now, 110 one period later: IRR is 10%
/// let f = |r: f64| -100.0 + 110.0 / (1.0 + r);
/// let df = |r: f64| -110.0 / (1.0 + r).powi(2);
///
/// let result = newton_raphson(f, df, 0.0, None, &SolverConfig::default()).unwrap();
/// assert!((result.root - 0.10).abs() < 1e-6);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergence_count = 0;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        let residual = fx.abs();

        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
                method: SolverMethod::Newton,
            });
        }

        if residual > prev_residual * 2.0 {
            divergence_count += 1;
            if divergence_count >= MAX_DIVERGENCE {
                return Err(MathError::Diverging { x, residual });
            }
        } else {
            divergence_count = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if dfx.abs() < MIN_DERIVATIVE || !dfx.is_finite() {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;

        if !x.is_finite() {
            return Err(MathError::invalid_input("Newton produced non-finite value"));
        }
        if let Some((lower, upper)) = bounds {
            if x < lower || x > upper {
                return Err(MathError::OutOfBounds { x, lower, upper });
            }
        }

        if step.abs() < config.step_tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
                method: SolverMethod::Newton,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_period_irr() {
        let f = |r: f64| -100.0 + 110.0 / (1.0 + r);
        let df = |r: f64| -110.0 / (1.0 + r).powi(2);

        let result = newton_raphson(f, df, 0.1, None, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.10, epsilon = 1e-7);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_converged_at_seed() {
        let f = |r: f64| r - 0.1;
        let df = |_: f64| 1.0;

        let result = newton_raphson(f, df, 0.1, None, &SolverConfig::default()).unwrap();

        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_zero_derivative_error() {
        let f = |x: f64| x * x * x - 1.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_raphson(f, df, 0.0, None, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }

    #[test]
    fn test_iteration_cap() {
        // x^2 + 1 has no real root; Newton wanders until the cap
        let f = |x: f64| x * x + 1.0;
        let df = |x: f64| 2.0 * x;

        let config = SolverConfig::default().with_max_iterations(5);
        let result = newton_raphson(f, df, 0.5, None, &config);

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 5, .. })
        ));
    }

    #[test]
    fn test_leaving_bounds() {
        // From 0 the first step lands near 1.33, outside [0, 1]
        let f = |x: f64| (x - 0.9).atan();
        let df = |x: f64| 1.0 / (1.0 + (x - 0.9).powi(2));

        let bounded = newton_raphson(f, df, 0.0, Some((0.0, 1.0)), &SolverConfig::default());
        assert!(matches!(bounded, Err(MathError::OutOfBounds { .. })));
    }
}
