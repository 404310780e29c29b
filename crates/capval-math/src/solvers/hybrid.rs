//! Hybrid root-finding algorithm.
//!
//! Newton-Raphson confined to a search interval, with bisection over the
//! same interval as the fallback.

use crate::error::{MathError, MathResult};
use crate::solvers::{bisection, newton_raphson, SolverConfig, SolverResult};

/// Hybrid root-finding algorithm.
///
/// # Strategy
///
/// 1. Run Newton-Raphson from `initial_guess`
/// 2. Abandon Newton if an iterate leaves `bounds`, the derivative vanishes,
///    the residual keeps growing, or the iteration cap is reached
/// 3. Otherwise fall back to bisection over `bounds`
///
/// Both phases share `config`. The error returned on total failure is the
/// bisection error, which is [`MathError::InvalidBracket`] when `bounds`
/// does not enclose a sign change.
///
/// # Example
///
/// ```rust
/// use capval_math::solvers::{hybrid, SolverConfig, SolverMethod};
///
/// let f = |r: f64| -100.0 + 110.0 / (1.0 + r);
/// let df = |r: f64| -110.0 / (1.0 + r).powi(2);
///
/// let result = hybrid(f, df, 0.1, (-0.99, 10.0), &SolverConfig::default()).unwrap();
/// assert_eq!(result.method, SolverMethod::Newton);
/// assert!((result.root - 0.10).abs() < 1e-6);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let (lower, upper) = (bounds.0.min(bounds.1), bounds.0.max(bounds.1));
    if !(lower..=upper).contains(&initial_guess) {
        return Err(MathError::OutOfBounds {
            x: initial_guess,
            lower,
            upper,
        });
    }

    match newton_raphson(&f, &df, initial_guess, Some((lower, upper)), config) {
        Ok(result) => Ok(result),
        Err(err) => {
            log::debug!("newton abandoned ({err}), bisecting [{lower}, {upper}]");
            bisection(&f, lower, upper, config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::solvers::SolverMethod;

    #[test]
    fn test_newton_path() {
        let f = |r: f64| -100.0 + 60.0 / (1.0 + r) + 60.0 / (1.0 + r).powi(2);
        let df = |r: f64| -60.0 / (1.0 + r).powi(2) - 120.0 / (1.0 + r).powi(3);

        let result = hybrid(f, df, 0.1, (-0.99, 10.0), &SolverConfig::default()).unwrap();

        assert_eq!(result.method, SolverMethod::Newton);
        assert!(f(result.root).abs() < 1e-6);
    }

    #[test]
    fn test_fallback_when_newton_leaves_interval() {
        // Flat derivative far from the root sends Newton outside [0, 1]
        let f = |x: f64| (x - 0.9).atan();
        let df = |x: f64| 1.0 / (1.0 + (x - 0.9).powi(2));

        let result = hybrid(f, df, 0.0, (0.0, 1.0), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.9, epsilon = 1e-5);
    }

    #[test]
    fn test_fallback_when_derivative_vanishes() {
        let f = |x: f64| x * x * x - 0.001;
        let df = |x: f64| 3.0 * x * x;

        let result = hybrid(f, df, 0.0, (-1.0, 1.0), &SolverConfig::default()).unwrap();

        assert_eq!(result.method, SolverMethod::Bisection);
        assert_relative_eq!(result.root, 0.1, epsilon = 1e-4);
    }

    #[test]
    fn test_no_sign_change_in_interval() {
        let f = |x: f64| x * x + 1.0;
        let df = |x: f64| 2.0 * x;

        let result = hybrid(f, df, 0.5, (-1.0, 1.0), &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_seed_outside_interval() {
        let f = |x: f64| x;
        let df = |_: f64| 1.0;

        let result = hybrid(f, df, 5.0, (-1.0, 1.0), &SolverConfig::default());

        assert!(matches!(result, Err(MathError::OutOfBounds { .. })));
    }
}
