//! Cash-flow series for project valuation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValuationError, ValuationResult};

/// Ordered per-period net cash flows of a single project.
///
/// Index 0 holds the initial outlay (conventionally the negated investment),
/// indices 1..n hold projected net flows of either sign. The series is never
/// empty and every amount is finite; both are checked on construction.
///
/// # Example
///
/// ```rust
/// use capval_core::types::CashFlowSeries;
///
/// let series = CashFlowSeries::from_investment(50_000.0, &[20_000.0; 3]).unwrap();
///
/// assert_eq!(series.amounts(), &[-50_000.0, 20_000.0, 20_000.0, 20_000.0]);
/// assert_eq!(series.cumulative(), vec![-50_000.0, -30_000.0, -10_000.0, 10_000.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CashFlowSeries {
    amounts: Vec<f64>,
}

impl CashFlowSeries {
    /// Creates a series from raw amounts, period 0 first.
    pub fn new(amounts: Vec<f64>) -> ValuationResult<Self> {
        if amounts.is_empty() {
            return Err(ValuationError::invalid_cash_flow(
                "series must contain at least the initial period",
            ));
        }
        if let Some(period) = amounts.iter().position(|cf| !cf.is_finite()) {
            return Err(ValuationError::invalid_cash_flow(format!(
                "amount at period {period} is not a finite number"
            )));
        }
        Ok(Self { amounts })
    }

    /// Creates a series from an investment magnitude and the periodic flows.
    ///
    /// The investment is negated into period 0.
    pub fn from_investment(investment: f64, flows: &[f64]) -> ValuationResult<Self> {
        let mut amounts = Vec::with_capacity(flows.len() + 1);
        amounts.push(-investment);
        amounts.extend_from_slice(flows);
        Self::new(amounts)
    }

    /// All amounts, period 0 first.
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Number of periods including period 0.
    pub fn periods(&self) -> usize {
        self.amounts.len()
    }

    /// Number of periods after the initial outlay.
    pub fn horizon(&self) -> usize {
        self.amounts.len() - 1
    }

    /// Initial investment magnitude, `-CF[0]`.
    pub fn initial_investment(&self) -> f64 {
        -self.amounts[0]
    }

    /// Flows after period 0.
    pub fn inflows(&self) -> &[f64] {
        &self.amounts[1..]
    }

    /// Undiscounted sum of the flows after period 0.
    pub fn total_inflows(&self) -> f64 {
        self.inflows().iter().sum()
    }

    /// Running sums `S[i] = CF[0] + ... + CF[i]`.
    pub fn cumulative(&self) -> Vec<f64> {
        self.amounts
            .iter()
            .scan(0.0, |acc, cf| {
                *acc += cf;
                Some(*acc)
            })
            .collect()
    }

    /// True when the series holds both a strictly positive and a strictly
    /// negative amount. Zero amounts carry no sign.
    pub fn has_sign_change(&self) -> bool {
        let positive = self.amounts.iter().any(|cf| *cf > 0.0);
        let negative = self.amounts.iter().any(|cf| *cf < 0.0);
        positive && negative
    }

    /// Number of sign changes between consecutive non-zero amounts.
    ///
    /// More than one means the IRR may not be unique.
    pub fn sign_changes(&self) -> usize {
        self.amounts
            .iter()
            .filter(|cf| **cf != 0.0)
            .map(|cf| cf.is_sign_positive())
            .collect::<Vec<_>>()
            .windows(2)
            .filter(|w| w[0] != w[1])
            .count()
    }

    /// Iterates `(period, amount)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.amounts.iter().copied().enumerate()
    }
}

impl TryFrom<Vec<f64>> for CashFlowSeries {
    type Error = ValuationError;

    fn try_from(amounts: Vec<f64>) -> ValuationResult<Self> {
        Self::new(amounts)
    }
}

impl From<CashFlowSeries> for Vec<f64> {
    fn from(series: CashFlowSeries) -> Self {
        series.amounts
    }
}

impl AsRef<[f64]> for CashFlowSeries {
    fn as_ref(&self) -> &[f64] {
        &self.amounts
    }
}

impl fmt::Display for CashFlowSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, cf) in self.amounts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cf:.2}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_series_rejected() {
        let err = CashFlowSeries::new(vec![]).unwrap_err();
        assert!(matches!(err, ValuationError::InvalidCashFlow { .. }));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = CashFlowSeries::new(vec![-100.0, f64::NAN]).unwrap_err();
        assert!(err.to_string().contains("period 1"));
    }

    #[test]
    fn test_single_period_series() {
        let series = CashFlowSeries::new(vec![-100.0]).unwrap();
        assert_eq!(series.horizon(), 0);
        assert_eq!(series.periods(), 1);
        assert!(series.inflows().is_empty());
        assert_relative_eq!(series.total_inflows(), 0.0);
    }

    #[test]
    fn test_investment_accessors() {
        let series = CashFlowSeries::from_investment(50_000.0, &[10_000.0; 5]).unwrap();
        assert_relative_eq!(series.initial_investment(), 50_000.0);
        assert_relative_eq!(series.total_inflows(), 50_000.0);
        assert_eq!(series.horizon(), 5);
    }

    #[test]
    fn test_cumulative() {
        let series = CashFlowSeries::new(vec![-100.0, 30.0, 30.0, 50.0]).unwrap();
        assert_eq!(series.cumulative(), vec![-100.0, -70.0, -40.0, 10.0]);
    }

    #[test]
    fn test_sign_change_detection() {
        assert!(CashFlowSeries::new(vec![-100.0, 50.0]).unwrap().has_sign_change());
        assert!(!CashFlowSeries::new(vec![100.0, 50.0, 60.0]).unwrap().has_sign_change());
        assert!(!CashFlowSeries::new(vec![-1.0, -2.0]).unwrap().has_sign_change());
        assert!(!CashFlowSeries::new(vec![0.0, 0.0]).unwrap().has_sign_change());
    }

    #[test]
    fn test_sign_change_count_skips_zeros() {
        let conventional = CashFlowSeries::new(vec![-100.0, 0.0, 60.0, 60.0]).unwrap();
        assert_eq!(conventional.sign_changes(), 1);

        let mine = CashFlowSeries::new(vec![-100.0, 230.0, -132.0]).unwrap();
        assert_eq!(mine.sign_changes(), 2);
    }

    #[test]
    fn test_serde_as_plain_array() {
        let series = CashFlowSeries::new(vec![-10.0, 11.0]).unwrap();
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, "[-10.0,11.0]");

        let bad: Result<CashFlowSeries, _> = serde_json::from_str("[]");
        assert!(bad.is_err());
    }

    #[test]
    fn test_display() {
        let series = CashFlowSeries::new(vec![-10.0, 11.5]).unwrap();
        assert_eq!(series.to_string(), "[-10.00, 11.50]");
    }
}
