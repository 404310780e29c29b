//! Net present value.
//!
//! ## Formula
//!
//! ```text
//! NPV(CF, r) = Σ_{t=0}^{n} CF[t] / (1 + r)^t
//! dNPV/dr    = Σ_{t=1}^{n} -t · CF[t] / (1 + r)^(t+1)
//! ```

use capval_core::{CashFlowSeries, ValuationError, ValuationResult};

/// Net present value of `series` discounted at `rate`.
///
/// Period 0 is undiscounted. Fails with [`ValuationError::InvalidRate`]
/// when `rate <= -1` or is not finite.
///
/// # Example
///
/// ```rust
/// use capval_analytics::npv::npv;
/// use capval_core::CashFlowSeries;
///
/// let series = CashFlowSeries::new(vec![-100.0, 110.0]).unwrap();
/// assert!(npv(&series, 0.10).unwrap().abs() < 1e-9);
/// ```
pub fn npv(series: &CashFlowSeries, rate: f64) -> ValuationResult<f64> {
    check_rate(rate)?;
    Ok(discounted_sum(series.amounts(), rate))
}

/// Derivative of [`npv`] with respect to the rate.
pub fn npv_derivative(series: &CashFlowSeries, rate: f64) -> ValuationResult<f64> {
    check_rate(rate)?;
    Ok(discounted_slope(series.amounts(), rate))
}

fn check_rate(rate: f64) -> ValuationResult<()> {
    if !rate.is_finite() || rate <= -1.0 {
        return Err(ValuationError::invalid_rate(rate));
    }
    Ok(())
}

/// Unchecked NPV kernel. Callers guarantee `rate > -1`.
pub(crate) fn discounted_sum(amounts: &[f64], rate: f64) -> f64 {
    let v = 1.0 / (1.0 + rate);
    let mut factor = 1.0;
    let mut total = 0.0;
    for cf in amounts {
        total += cf * factor;
        factor *= v;
    }
    total
}

/// Unchecked derivative kernel. Callers guarantee `rate > -1`.
pub(crate) fn discounted_slope(amounts: &[f64], rate: f64) -> f64 {
    let v = 1.0 / (1.0 + rate);
    // factor tracks v^(t+1)
    let mut factor = v;
    let mut total = 0.0;
    for (t, cf) in amounts.iter().enumerate() {
        total -= t as f64 * cf * factor;
        factor *= v;
    }
    total
}
