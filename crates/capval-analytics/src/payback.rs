//! Payback period.

use capval_core::CashFlowSeries;

/// First period at which the cumulative cash position is no longer negative.
///
/// Returns `None` when the cumulative sum stays below zero through the
/// horizon. A series whose period 0 is already non-negative pays back at 0.
///
/// # Example
///
/// ```rust
/// use capval_analytics::payback::payback_period;
/// use capval_core::CashFlowSeries;
///
/// let series = CashFlowSeries::new(vec![-50_000.0, 20_000.0, 20_000.0, 20_000.0]).unwrap();
/// assert_eq!(payback_period(&series), Some(3));
/// ```
pub fn payback_period(series: &CashFlowSeries) -> Option<usize> {
    let mut cumulative = 0.0;
    for (period, amount) in series.iter() {
        cumulative += amount;
        if cumulative >= 0.0 {
            return Some(period);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payback(amounts: &[f64]) -> Option<usize> {
        payback_period(&CashFlowSeries::new(amounts.to_vec()).unwrap())
    }

    #[test]
    fn test_recovered_mid_horizon() {
        assert_eq!(payback(&[-50_000.0, 20_000.0, 20_000.0, 20_000.0, 20_000.0]), Some(3));
    }

    #[test]
    fn test_exact_recovery_counts() {
        assert_eq!(
            payback(&[-50_000.0, 10_000.0, 10_000.0, 10_000.0, 10_000.0, 10_000.0]),
            Some(5)
        );
    }

    #[test]
    fn test_not_recovered() {
        assert_eq!(payback(&[-100.0, 10.0, 20.0]), None);
    }

    #[test]
    fn test_non_negative_start() {
        assert_eq!(payback(&[0.0, 10.0]), Some(0));
        assert_eq!(payback(&[25.0, -100.0]), Some(0));
    }

    #[test]
    fn test_first_crossing_wins() {
        // recovers at 1, dips again at 2
        assert_eq!(payback(&[-10.0, 15.0, -20.0, 30.0]), Some(1));
    }
}
