//! # Capval Analytics
//!
//! Valuation engine for capital projects.
//!
//! Given a [`CashFlowSeries`](capval_core::CashFlowSeries) and a base
//! [`DiscountRate`](capval_core::DiscountRate) this crate computes:
//!
//! - **NPV**: Net present value and its rate derivative
//! - **IRR**: Internal rate of return via a bounded Newton/bisection hybrid
//! - **Payback**: First period with a non-negative cumulative position
//! - **Ratios**: Return on investment and margin of safety
//! - **Sensitivity**: NPV over a grid of rates around the base rate
//! - **Viability**: All of the above plus a viable / not viable verdict
//!
//! ## Usage
//!
//! ```rust
//! use capval_analytics::prelude::*;
//! use capval_core::{CashFlowSeries, DiscountRate};
//!
//! let series = CashFlowSeries::from_investment(50_000.0, &[10_000.0; 5]).unwrap();
//! let base = DiscountRate::new(0.10).unwrap();
//!
//! let report = ViabilityAnalyzer::new().analyze(&series, base).unwrap();
//! assert_eq!(report.recommendation, Recommendation::NotViable);
//! assert!(report.metrics.npv < 0.0);
//!
//! let curve = SensitivitySweep::default().run(&series, base).unwrap();
//! assert_eq!(curve.len(), 20);
//! ```
//!
//! ## Features
//!
//! - `parallel`: evaluate sensitivity grids with rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod irr;
pub mod npv;
pub mod payback;
pub mod ratios;
pub mod sensitivity;
pub mod viability;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::irr::{irr, IrrResult, IrrSolver};
    pub use crate::npv::{npv, npv_derivative};
    pub use crate::payback::payback_period;
    pub use crate::ratios::{margin_of_safety, roi};
    pub use crate::sensitivity::{SensitivityCurve, SensitivityPoint, SensitivitySweep};
    pub use crate::viability::{
        analyze, Recommendation, ViabilityAnalyzer, ViabilityMetrics, ViabilityReport,
    };
}

pub use irr::{IrrResult, IrrSolver};
pub use sensitivity::{SensitivityCurve, SensitivityPoint, SensitivitySweep};
pub use viability::{Recommendation, ViabilityAnalyzer, ViabilityMetrics, ViabilityReport};
