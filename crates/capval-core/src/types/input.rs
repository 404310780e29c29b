//! Project input as collected from data entry.

use serde::{Deserialize, Serialize};

use crate::error::{ValuationError, ValuationResult};
use crate::types::{CashFlowSeries, DiscountRate};

/// Longest horizon accepted from data entry, in periods.
pub const MAX_HORIZON: u32 = 50;

/// Raw project figures before validation.
///
/// This is the boundary with whatever collects the numbers (a form, a CLI,
/// a file). The investment is a magnitude and the discount rate a fraction
/// in `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use capval_core::types::ProjectInput;
///
/// let input = ProjectInput::new(50_000.0, 0.10, vec![10_000.0; 5]);
/// assert_eq!(input.horizon, 5);
///
/// let series = input.to_series().unwrap();
/// assert_eq!(series.amounts()[0], -50_000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    /// Number of periods after the initial outlay.
    pub horizon: u32,
    /// Initial investment magnitude.
    pub investment: f64,
    /// Base discount rate as a fraction.
    pub discount_rate: f64,
    /// Net cash flow for periods 1..=horizon.
    pub cash_flows: Vec<f64>,
}

impl ProjectInput {
    /// Creates an input whose horizon is the number of flows given.
    pub fn new(investment: f64, discount_rate: f64, cash_flows: Vec<f64>) -> Self {
        Self {
            horizon: u32::try_from(cash_flows.len()).unwrap_or(u32::MAX),
            investment,
            discount_rate,
            cash_flows,
        }
    }

    /// Checks every field, reporting the first problem found.
    pub fn validate(&self) -> ValuationResult<()> {
        if self.horizon == 0 || self.horizon > MAX_HORIZON {
            return Err(ValuationError::invalid_input(
                "horizon",
                format!("{} periods is outside 1..={}", self.horizon, MAX_HORIZON),
            ));
        }

        if self.cash_flows.len() != self.horizon as usize {
            return Err(ValuationError::invalid_input(
                "cash_flows",
                format!(
                    "expected {} periodic flows, got {}",
                    self.horizon,
                    self.cash_flows.len()
                ),
            ));
        }

        if !self.investment.is_finite() {
            return Err(ValuationError::invalid_input(
                "investment",
                "must be a finite amount",
            ));
        }

        if !self.discount_rate.is_finite() || !(0.0..=1.0).contains(&self.discount_rate) {
            return Err(ValuationError::invalid_input(
                "discount_rate",
                format!("{} is outside [0, 1]", self.discount_rate),
            ));
        }

        if let Some(index) = self.cash_flows.iter().position(|cf| !cf.is_finite()) {
            return Err(ValuationError::invalid_input(
                "cash_flows",
                format!("flow for period {} is not a finite number", index + 1),
            ));
        }

        Ok(())
    }

    /// Validates and builds the cash-flow series.
    pub fn to_series(&self) -> ValuationResult<CashFlowSeries> {
        self.validate()?;
        CashFlowSeries::from_investment(self.investment, &self.cash_flows)
    }

    /// Validates once and returns the series and base rate together.
    pub fn into_parts(self) -> ValuationResult<(CashFlowSeries, DiscountRate)> {
        self.validate()?;
        let rate = DiscountRate::new(self.discount_rate)?;
        let series = CashFlowSeries::from_investment(self.investment, &self.cash_flows)?;
        Ok((series, rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ValuationError) -> &'static str {
        match err {
            ValuationError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_input() {
        let input = ProjectInput::new(50_000.0, 0.10, vec![10_000.0; 5]);
        assert!(input.validate().is_ok());

        let (series, rate) = input.into_parts().unwrap();
        assert_eq!(series.periods(), 6);
        assert_eq!(rate.value(), 0.10);
    }

    #[test]
    fn test_horizon_bounds() {
        let empty = ProjectInput::new(1_000.0, 0.1, vec![]);
        assert_eq!(field_of(empty.validate().unwrap_err()), "horizon");

        let long = ProjectInput::new(1_000.0, 0.1, vec![100.0; 51]);
        assert_eq!(field_of(long.validate().unwrap_err()), "horizon");

        let max = ProjectInput::new(1_000.0, 0.1, vec![100.0; 50]);
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_horizon_must_match_flows() {
        let mut input = ProjectInput::new(1_000.0, 0.1, vec![100.0; 3]);
        input.horizon = 4;
        assert_eq!(field_of(input.validate().unwrap_err()), "cash_flows");
    }

    #[test]
    fn test_rate_range() {
        let negative = ProjectInput::new(1_000.0, -0.01, vec![100.0]);
        assert_eq!(field_of(negative.validate().unwrap_err()), "discount_rate");

        let above_one = ProjectInput::new(1_000.0, 1.01, vec![100.0]);
        assert_eq!(field_of(above_one.validate().unwrap_err()), "discount_rate");

        let full = ProjectInput::new(1_000.0, 1.0, vec![100.0]);
        assert!(full.validate().is_ok());
    }

    #[test]
    fn test_non_finite_values() {
        let investment = ProjectInput::new(f64::NAN, 0.1, vec![100.0]);
        assert_eq!(field_of(investment.validate().unwrap_err()), "investment");

        let flow = ProjectInput::new(1_000.0, 0.1, vec![100.0, f64::INFINITY]);
        assert_eq!(field_of(flow.validate().unwrap_err()), "cash_flows");
    }

    #[test]
    fn test_zero_investment_is_valid_input() {
        let input = ProjectInput::new(0.0, 0.1, vec![100.0]);
        let series = input.to_series().unwrap();
        assert_eq!(series.initial_investment(), 0.0);
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{"horizon":2,"investment":100.0,"discount_rate":0.05,"cash_flows":[60.0,60.0]}"#;
        let input: ProjectInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.cash_flows, vec![60.0, 60.0]);
        assert!(input.validate().is_ok());
    }
}
