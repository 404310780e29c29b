//! Error types for the Capval library.
//!
//! Every calculator reports failure through [`ValuationError`]. Whether a
//! failure aborts an analysis or merely marks one metric as unavailable is
//! decided by the aggregator, not here.

use thiserror::Error;

/// A specialized Result type for valuation operations.
pub type ValuationResult<T> = Result<T, ValuationError>;

/// The main error type for valuation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    /// Discount rate at or below -100%, or not a finite number.
    #[error("Invalid discount rate: {rate} (must be finite and greater than -1)")]
    InvalidRate {
        /// The rejected rate, as a fraction.
        rate: f64,
    },

    /// Cash flows never change sign, so no rate zeroes the NPV.
    #[error("No internal rate of return: cash flows never change sign")]
    NoRoot,

    /// The IRR solver exhausted its iteration budget or lost its bracket.
    #[error("IRR solver did not converge after {iterations} iterations (residual: {residual:.2e})")]
    NoConvergence {
        /// Iterations spent before giving up.
        iterations: u32,
        /// Last absolute NPV residual.
        residual: f64,
    },

    /// Ratio against a zero initial investment.
    #[error("Division by zero: initial investment is zero")]
    DivisionByZero,

    /// Cash-flow series violates its construction invariants.
    #[error("Invalid cash flow: {reason}")]
    InvalidCashFlow {
        /// Description of the invalid cash flow.
        reason: String,
    },

    /// A project input or calculator parameter is out of range.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },
}

impl ValuationError {
    /// Creates an invalid rate error.
    #[must_use]
    pub fn invalid_rate(rate: f64) -> Self {
        Self::InvalidRate { rate }
    }

    /// Creates a convergence failure error.
    #[must_use]
    pub fn no_convergence(iterations: u32, residual: f64) -> Self {
        Self::NoConvergence {
            iterations,
            residual,
        }
    }

    /// Creates an invalid cash flow error.
    #[must_use]
    pub fn invalid_cash_flow(reason: impl Into<String>) -> Self {
        Self::InvalidCashFlow {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Returns true for failures that make a metric unavailable rather
    /// than invalidating the analysis.
    pub fn is_undefined_metric(&self) -> bool {
        matches!(
            self,
            Self::NoRoot | Self::NoConvergence { .. } | Self::DivisionByZero
        )
    }
}
