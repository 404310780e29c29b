//! Discount-rate sensitivity sweep.
//!
//! Evaluates NPV over an evenly spaced grid of rates centred on the base
//! rate. The grid runs from `r0 - w` to `r0 + w` inclusive with `k` points;
//! a lower end at or below -1 is clipped to just above -1.

use serde::{Deserialize, Serialize};

use capval_core::{CashFlowSeries, DiscountRate, ValuationError, ValuationResult};

use crate::npv::discounted_sum;

/// Default number of grid points.
pub const DEFAULT_POINTS: usize = 20;

/// Default half-width of the grid around the base rate.
pub const DEFAULT_HALF_WIDTH: f64 = 0.10;

/// Distance kept above -1 when clipping the lower end of the grid.
pub const MIN_RATE_MARGIN: f64 = 1e-6;

/// One evaluated grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Discount rate as a fraction.
    pub rate: f64,
    /// NPV at `rate`.
    pub npv: f64,
}

/// NPV as a function of the discount rate.
///
/// Points are ordered by strictly increasing rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCurve {
    /// Rate the grid is centred on.
    pub base_rate: f64,
    /// Evaluated points.
    pub points: Vec<SensitivityPoint>,
}

impl SensitivityCurve {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Grid rates in order.
    pub fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.rate)
    }

    /// Index of the grid point closest to the base rate.
    pub fn nearest_to_base(&self) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (a.rate - self.base_rate)
                    .abs()
                    .total_cmp(&(b.rate - self.base_rate).abs())
            })
            .map(|(index, _)| index)
    }

    /// True when NPV never increases along the grid.
    pub fn is_non_increasing(&self) -> bool {
        self.points.windows(2).all(|w| w[1].npv <= w[0].npv)
    }

    /// Linear estimate of the first rate where NPV changes sign on the grid.
    pub fn break_even_estimate(&self) -> Option<f64> {
        self.points.windows(2).find_map(|w| {
            let (a, b) = (w[0], w[1]);
            if a.npv == 0.0 {
                Some(a.rate)
            } else if a.npv * b.npv < 0.0 {
                Some(a.rate + (b.rate - a.rate) * a.npv / (a.npv - b.npv))
            } else {
                None
            }
        })
    }
}

/// Sweep settings.
///
/// # Example
///
/// ```rust
/// use capval_analytics::sensitivity::SensitivitySweep;
/// use capval_core::{CashFlowSeries, DiscountRate};
///
/// let series = CashFlowSeries::new(vec![-100.0, 60.0, 60.0]).unwrap();
/// let base = DiscountRate::new(0.10).unwrap();
///
/// let curve = SensitivitySweep::new(5, 0.10).unwrap().run(&series, base).unwrap();
/// assert_eq!(curve.len(), 5);
/// assert!(curve.is_non_increasing());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivitySweep {
    points: usize,
    half_width: f64,
}

impl Default for SensitivitySweep {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
            half_width: DEFAULT_HALF_WIDTH,
        }
    }
}

impl SensitivitySweep {
    /// Creates sweep settings, rejecting fewer than two points or a
    /// non-positive or non-finite half-width.
    pub fn new(points: usize, half_width: f64) -> ValuationResult<Self> {
        if points < 2 {
            return Err(ValuationError::invalid_input(
                "points",
                format!("{points} is fewer than 2"),
            ));
        }
        if !half_width.is_finite() || half_width <= 0.0 {
            return Err(ValuationError::invalid_input(
                "half_width",
                format!("{half_width} must be a positive finite number"),
            ));
        }
        Ok(Self { points, half_width })
    }

    /// Number of grid points.
    pub fn points(&self) -> usize {
        self.points
    }

    /// Half-width of the grid.
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// The rate grid for `base`, endpoints included.
    pub fn rate_grid(&self, base: DiscountRate) -> ValuationResult<Vec<f64>> {
        let r0 = base.value();
        let lower = (r0 - self.half_width).max(-1.0 + MIN_RATE_MARGIN);
        let upper = r0 + self.half_width;

        if upper <= lower {
            return Err(ValuationError::invalid_input(
                "base_rate",
                format!("{r0} leaves no room for a grid above -1"),
            ));
        }
        if lower > r0 - self.half_width {
            log::debug!("sweep lower end clipped to {lower}");
        }

        let last = self.points - 1;
        let step = (upper - lower) / last as f64;
        Ok((0..self.points)
            .map(|i| if i == last { upper } else { lower + step * i as f64 })
            .collect())
    }

    /// Evaluates NPV across the grid.
    pub fn run(
        &self,
        series: &CashFlowSeries,
        base: DiscountRate,
    ) -> ValuationResult<SensitivityCurve> {
        let grid = self.rate_grid(base)?;
        log::debug!(
            "sweeping {} rates over [{:.6}, {:.6}]",
            grid.len(),
            grid[0],
            grid[grid.len() - 1]
        );

        let points = evaluate(series.amounts(), &grid);

        Ok(SensitivityCurve {
            base_rate: base.value(),
            points,
        })
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate(amounts: &[f64], grid: &[f64]) -> Vec<SensitivityPoint> {
    grid.iter()
        .map(|&rate| SensitivityPoint {
            rate,
            npv: discounted_sum(amounts, rate),
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn evaluate(amounts: &[f64], grid: &[f64]) -> Vec<SensitivityPoint> {
    use rayon::prelude::*;

    grid.par_iter()
        .map(|&rate| SensitivityPoint {
            rate,
            npv: discounted_sum(amounts, rate),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npv::npv;
    use approx::assert_relative_eq;

    fn rate(value: f64) -> DiscountRate {
        DiscountRate::new(value).unwrap()
    }

    #[test]
    fn test_default_grid() {
        let grid = SensitivitySweep::default().rate_grid(rate(0.10)).unwrap();
        assert_eq!(grid.len(), 20);
        assert_relative_eq!(grid[0], 0.0);
        assert_eq!(grid[19], 0.10 + 0.10);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_odd_grid_contains_base() {
        let grid = SensitivitySweep::new(5, 0.05).unwrap().rate_grid(rate(0.10)).unwrap();
        assert_relative_eq!(grid[2], 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_lower_end_clipped() {
        let grid = SensitivitySweep::new(3, 0.5).unwrap().rate_grid(rate(-0.8)).unwrap();
        assert_relative_eq!(grid[0], -1.0 + MIN_RATE_MARGIN);
        assert!(grid[0] > -1.0);
        assert_relative_eq!(grid[2], -0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            SensitivitySweep::new(1, 0.1).unwrap_err(),
            ValuationError::InvalidInput { field: "points", .. }
        ));
        assert!(SensitivitySweep::new(10, 0.0).is_err());
        assert!(SensitivitySweep::new(10, -0.1).is_err());
        assert!(SensitivitySweep::new(10, f64::NAN).is_err());
    }

    #[test]
    fn test_curve_matches_npv() {
        let series = CashFlowSeries::new(vec![-1_000.0, 400.0, 400.0, 400.0]).unwrap();
        let curve = SensitivitySweep::new(7, 0.06).unwrap().run(&series, rate(0.08)).unwrap();

        assert_eq!(curve.len(), 7);
        assert_relative_eq!(curve.base_rate, 0.08);
        for point in &curve.points {
            assert_relative_eq!(point.npv, npv(&series, point.rate).unwrap(), epsilon = 1e-9);
        }
        assert!(curve.is_non_increasing());
        assert_eq!(curve.nearest_to_base(), Some(3));
    }

    #[test]
    fn test_break_even_estimate_near_irr() {
        let series = CashFlowSeries::new(vec![-100.0, 110.0]).unwrap();
        let curve = SensitivitySweep::new(21, 0.10).unwrap().run(&series, rate(0.10)).unwrap();
        let estimate = curve.break_even_estimate().unwrap();
        assert!((estimate - 0.10).abs() < 1e-3);
    }

    #[test]
    fn test_curve_serializes() {
        let series = CashFlowSeries::new(vec![-100.0, 110.0]).unwrap();
        let curve = SensitivitySweep::new(2, 0.05).unwrap().run(&series, rate(0.10)).unwrap();
        let json = serde_json::to_value(&curve).unwrap();
        assert_eq!(json["points"].as_array().unwrap().len(), 2);
        assert!(json["points"][0]["rate"].is_number());
    }
}
