//! Recommendation policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the viability recommendation treats an undefined IRR.
///
/// With a defined IRR both policies require `NPV > 0` and `IRR > r0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationPolicy {
    /// Undefined IRR falls back to the NPV condition alone.
    #[default]
    NpvOnly,
    /// Undefined IRR means not viable.
    RequireIrr,
}

impl RecommendationPolicy {
    /// Configuration name of the policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NpvOnly => "npv-only",
            Self::RequireIrr => "require-irr",
        }
    }
}

impl fmt::Display for RecommendationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "npv-only" | "npv" => Ok(Self::NpvOnly),
            "require-irr" | "irr" => Ok(Self::RequireIrr),
            other => Err(format!(
                "unknown recommendation policy '{other}' (expected npv-only or require-irr)"
            )),
        }
    }
}
