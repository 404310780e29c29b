//! # Capval Core
//!
//! Core types and errors for the Capval project viability library.
//!
//! This crate provides the foundational building blocks used throughout Capval:
//!
//! - **Types**: `CashFlowSeries`, `DiscountRate`, `ProjectInput`, `RecommendationPolicy`
//! - **Errors**: `ValuationError`, the failure taxonomy shared by every calculator
//!
//! ## Example
//!
//! ```rust
//! use capval_core::prelude::*;
//!
//! let input = ProjectInput::new(50_000.0, 0.10, vec![20_000.0; 5]);
//! let (series, rate) = input.into_parts().unwrap();
//!
//! assert_eq!(series.horizon(), 5);
//! assert_eq!(series.initial_investment(), 50_000.0);
//! assert_eq!(rate.to_string(), "10.00%");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ValuationError, ValuationResult};
    pub use crate::types::{
        CashFlowSeries, DiscountRate, ProjectInput, RecommendationPolicy, MAX_HORIZON,
    };
}

// Re-export commonly used types at crate root
pub use error::{ValuationError, ValuationResult};
pub use types::{CashFlowSeries, DiscountRate, ProjectInput, RecommendationPolicy};
