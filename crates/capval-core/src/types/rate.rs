//! Discount rate type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValuationError, ValuationResult};

/// A per-period discount rate stored as a fraction (0.10 for 10%).
///
/// Any finite rate above -1 is accepted; -1 would divide by zero when
/// discounting. Narrower ranges (such as the [0, 1] accepted from data
/// entry) are enforced by [`crate::types::ProjectInput`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DiscountRate(f64);

impl DiscountRate {
    /// Creates a rate from a fraction.
    pub fn new(value: f64) -> ValuationResult<Self> {
        if !value.is_finite() || value <= -1.0 {
            return Err(ValuationError::invalid_rate(value));
        }
        Ok(Self(value))
    }

    /// Creates a rate from a percentage (10.0 for 10%).
    pub fn from_percent(percent: f64) -> ValuationResult<Self> {
        Self::new(percent / 100.0)
    }

    /// The rate as a fraction.
    pub fn value(self) -> f64 {
        self.0
    }

    /// The rate as a percentage.
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl TryFrom<f64> for DiscountRate {
    type Error = ValuationError;

    fn try_from(value: f64) -> ValuationResult<Self> {
        Self::new(value)
    }
}

impl From<DiscountRate> for f64 {
    fn from(rate: DiscountRate) -> Self {
        rate.0
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.as_percent())
    }
}
