//! # Capval Math
//!
//! Numerical utilities for the Capval project viability library.
//!
//! This crate provides:
//!
//! - **Solvers**: Root-finding algorithms (Newton-Raphson, Bisection, and a
//!   bounded hybrid of the two used for internal rate of return)
//!
//! ## Design Philosophy
//!
//! - **Bounded Work**: Every solver stops at a fixed iteration cap
//! - **Explicit Failure**: Divergence and missing brackets are errors, never NaN
//! - **Generic**: Solvers take plain `Fn(f64) -> f64` closures

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, hybrid, newton_raphson, SolverConfig, SolverMethod, SolverResult,
    };
}

pub use error::{MathError, MathResult};
