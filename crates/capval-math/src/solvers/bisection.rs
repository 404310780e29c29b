//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverMethod, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the interval and keeps the half containing the sign
/// change. Requires `f(a) * f(b) <= 0`.
///
/// Stops when `|f(mid)| < config.tolerance` or the half-width drops below
/// `config.step_tolerance`.
///
/// # Example
///
/// ```rust
/// use capval_math::solvers::{bisection, SolverConfig};
///
/// let f = |r: f64| -100.0 + 121.0 / (1.0 + r).powi(2);
///
/// let result = bisection(f, -0.99, 10.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - 0.10).abs() < 1e-6);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if !f_lo.is_finite() || !f_hi.is_finite() || f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    if f_lo.abs() < config.tolerance {
        return Ok(endpoint(lo, f_lo));
    }
    if f_hi.abs() < config.tolerance {
        return Ok(endpoint(hi, f_hi));
    }

    for iteration in 0..config.max_iterations {
        let mid = lo + (hi - lo) / 2.0;
        let f_mid = f(mid);

        if f_mid.abs() < config.tolerance || (hi - lo) / 2.0 < config.step_tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
                method: SolverMethod::Bisection,
            });
        }

        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let mid = lo + (hi - lo) / 2.0;
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}

fn endpoint(x: f64, fx: f64) -> SolverResult {
    SolverResult {
        root: x,
        iterations: 0,
        residual: fx,
        method: SolverMethod::Bisection,
    }
}
