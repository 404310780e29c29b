//! Domain types for project valuation.

mod cashflow;
mod input;
mod policy;
mod rate;

pub use cashflow::CashFlowSeries;
pub use input::{ProjectInput, MAX_HORIZON};
pub use policy::RecommendationPolicy;
pub use rate::DiscountRate;
