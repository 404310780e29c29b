//! Viability metrics, recommendation and the analyzer tying them together.

use serde::{Deserialize, Serialize};
use std::fmt;

use capval_core::{
    CashFlowSeries, DiscountRate, RecommendationPolicy, ValuationError, ValuationResult,
};

use crate::irr::{IrrResult, IrrSolver};
use crate::npv::npv;
use crate::payback::payback_period;
use crate::ratios::{margin_of_safety, roi};
use crate::sensitivity::{SensitivityCurve, SensitivitySweep};

/// The five viability figures for one project at one base rate.
///
/// Metrics that cannot be computed are `None` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViabilityMetrics {
    /// Net present value at the base rate.
    pub npv: f64,
    /// Internal rate of return as a fraction.
    pub irr: Option<f64>,
    /// First period with a non-negative cumulative position.
    pub payback: Option<usize>,
    /// Undiscounted return on investment in percent.
    pub roi: Option<f64>,
    /// NPV over the initial investment in percent.
    pub margin_of_safety: Option<f64>,
}

/// Binary viability verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    /// The project clears the base rate.
    Viable,
    /// The project does not clear the base rate.
    NotViable,
}

impl Recommendation {
    /// Decides viability from the metrics.
    ///
    /// With a defined IRR the project is viable iff `NPV > 0` and
    /// `IRR > r0`. With an undefined IRR the policy decides.
    pub fn decide(
        metrics: &ViabilityMetrics,
        base: DiscountRate,
        policy: RecommendationPolicy,
    ) -> Self {
        let positive_npv = metrics.npv > 0.0;
        let viable = match (metrics.irr, policy) {
            (Some(irr), _) => positive_npv && irr > base.value(),
            (None, RecommendationPolicy::NpvOnly) => positive_npv,
            (None, RecommendationPolicy::RequireIrr) => false,
        };
        if viable {
            Self::Viable
        } else {
            Self::NotViable
        }
    }

    /// True for [`Recommendation::Viable`].
    pub fn is_viable(self) -> bool {
        self == Self::Viable
    }

    /// Human-readable advice.
    pub fn message(self) -> &'static str {
        match self {
            Self::Viable => "The project is viable and should be considered for execution.",
            Self::NotViable => {
                "The project does not appear to be viable. A review of the cash flows is recommended."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viable => write!(f, "Viable"),
            Self::NotViable => write!(f, "Not viable"),
        }
    }
}

/// Everything the analyzer produces for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViabilityReport {
    /// Base discount rate as a fraction.
    pub base_rate: f64,
    /// Computed metrics.
    pub metrics: ViabilityMetrics,
    /// Verdict.
    pub recommendation: Recommendation,
    /// Why the IRR is missing, when it is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irr_note: Option<String>,
    /// True when the series has several sign changes and the IRR may not
    /// be unique.
    #[serde(default)]
    pub irr_ambiguous: bool,
}

/// Computes metrics and recommendations with configurable components.
///
/// # Example
///
/// ```rust
/// use capval_analytics::viability::{Recommendation, ViabilityAnalyzer};
/// use capval_core::{CashFlowSeries, DiscountRate};
///
/// let series = CashFlowSeries::from_investment(50_000.0, &[20_000.0; 5]).unwrap();
/// let base = DiscountRate::new(0.10).unwrap();
///
/// let report = ViabilityAnalyzer::new().analyze(&series, base).unwrap();
/// assert_eq!(report.recommendation, Recommendation::Viable);
/// assert_eq!(report.metrics.payback, Some(3));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ViabilityAnalyzer {
    solver: IrrSolver,
    sweep: SensitivitySweep,
    policy: RecommendationPolicy,
}

impl ViabilityAnalyzer {
    /// Creates an analyzer with default solver, sweep and policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the IRR solver.
    #[must_use]
    pub fn with_solver(mut self, solver: IrrSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the sensitivity sweep.
    #[must_use]
    pub fn with_sweep(mut self, sweep: SensitivitySweep) -> Self {
        self.sweep = sweep;
        self
    }

    /// Sets the recommendation policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RecommendationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The IRR solver in use.
    pub fn solver(&self) -> &IrrSolver {
        &self.solver
    }

    /// The sweep in use.
    pub fn sweep(&self) -> &SensitivitySweep {
        &self.sweep
    }

    /// The policy in use.
    pub fn policy(&self) -> RecommendationPolicy {
        self.policy
    }

    /// Solves for the IRR with the configured solver.
    pub fn irr(&self, series: &CashFlowSeries) -> ValuationResult<IrrResult> {
        self.solver.solve(series)
    }

    /// Computes metrics and the recommendation.
    ///
    /// An undefined IRR or a zero investment leaves the affected metrics
    /// empty. Only invalid solver settings fail the whole analysis.
    pub fn analyze(
        &self,
        series: &CashFlowSeries,
        base: DiscountRate,
    ) -> ValuationResult<ViabilityReport> {
        let npv = npv(series, base.value())?;

        let (irr, irr_note, irr_ambiguous) = match self.irr(series) {
            Ok(result) => (Some(result.rate), None, result.ambiguous),
            Err(err) if err.is_undefined_metric() => {
                log::info!("IRR not available: {err}");
                (None, Some(err.to_string()), false)
            }
            Err(err) => return Err(err),
        };

        let roi = match roi(series) {
            Ok(value) => Some(value),
            Err(ValuationError::DivisionByZero) => None,
            Err(err) => return Err(err),
        };

        let metrics = ViabilityMetrics {
            npv,
            irr,
            payback: payback_period(series),
            roi,
            margin_of_safety: margin_of_safety(npv, series.initial_investment()),
        };
        let recommendation = Recommendation::decide(&metrics, base, self.policy);

        log::debug!(
            "analyzed {} periods at {}: NPV {:.2}, {}",
            series.periods(),
            base,
            npv,
            recommendation
        );

        Ok(ViabilityReport {
            base_rate: base.value(),
            metrics,
            recommendation,
            irr_note,
            irr_ambiguous,
        })
    }

    /// Runs the configured sensitivity sweep.
    pub fn sensitivity(
        &self,
        series: &CashFlowSeries,
        base: DiscountRate,
    ) -> ValuationResult<SensitivityCurve> {
        self.sweep.run(series, base)
    }
}

/// Metrics and recommendation with the default analyzer.
pub fn analyze(series: &CashFlowSeries, base: DiscountRate) -> ValuationResult<ViabilityReport> {
    ViabilityAnalyzer::new().analyze(series, base)
}
