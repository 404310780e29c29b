//! Return on investment and margin of safety.
//!
//! Both ratios divide by the initial investment `I = -CF[0]` and are
//! undefined when it is zero.

use capval_core::{CashFlowSeries, ValuationError, ValuationResult};

/// Investments smaller than this in magnitude are treated as zero.
pub const ZERO_INVESTMENT: f64 = f64::EPSILON;

/// Undiscounted return on investment in percent, `(Σ CF[1..] - I) / I × 100`.
///
/// Fails with [`ValuationError::DivisionByZero`] when the investment is zero.
///
/// # Example
///
/// ```rust
/// use capval_analytics::ratios::roi;
/// use capval_core::CashFlowSeries;
///
/// let series = CashFlowSeries::new(vec![-100.0, 60.0, 90.0]).unwrap();
/// assert!((roi(&series).unwrap() - 50.0).abs() < 1e-12);
/// ```
pub fn roi(series: &CashFlowSeries) -> ValuationResult<f64> {
    let investment = series.initial_investment();
    if investment.abs() < ZERO_INVESTMENT {
        return Err(ValuationError::DivisionByZero);
    }
    Ok((series.total_inflows() - investment) / investment * 100.0)
}

/// Margin of safety in percent, `NPV / I × 100`.
///
/// `None` when the investment is zero.
pub fn margin_of_safety(npv: f64, investment: f64) -> Option<f64> {
    if investment.abs() < ZERO_INVESTMENT {
        None
    } else {
        Some(npv / investment * 100.0)
    }
}
