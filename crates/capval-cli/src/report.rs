//! Row builders shared by the commands and the Markdown report.
//!
//! The report is rendered into a `String`; writing it anywhere is left to
//! the caller.

use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use capval_analytics::{SensitivityCurve, ViabilityReport};
use capval_core::CashFlowSeries;

use crate::output::{
    format_amount, format_payback, format_percent_opt, format_rate, format_rate_opt,
    recommendation_token, KeyValue,
};

/// Report title.
pub const REPORT_TITLE: &str = "Investment Viability Report";

const EXPLANATIONS: [(&str, &str); 5] = [
    (
        "Net Present Value (NPV)",
        "the value the project creates today once every projected cash flow is discounted at the base rate. A positive NPV means the project is profitable.",
    ),
    (
        "Internal Rate of Return (IRR)",
        "the discount rate at which the NPV is exactly zero, a measure of the project's profitability.",
    ),
    (
        "Return on Investment (ROI)",
        "how much the project returns, undiscounted, relative to the amount initially invested.",
    ),
    (
        "Payback Period",
        "the number of periods it takes for the cash flows to recover the initial investment.",
    ),
    (
        "Margin of Safety",
        "the NPV as a proportion of the investment.",
    ),
];

/// One period of the cash-flow schedule.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct FlowRow {
    #[tabled(rename = "Period")]
    pub period: usize,
    #[tabled(rename = "Cash Flow", display_with = "display_amount")]
    pub amount: f64,
    #[tabled(rename = "Cumulative", display_with = "display_amount")]
    pub cumulative: f64,
}

fn display_amount(value: &f64) -> String {
    format_amount(*value)
}

/// One row of a sensitivity table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SweepRow {
    #[tabled(rename = "Rate")]
    pub rate: String,
    #[tabled(rename = "NPV")]
    pub npv: String,
    #[tabled(rename = "")]
    #[serde(skip)]
    pub marker: &'static str,
}

/// Cash-flow schedule with running totals.
pub fn flow_rows(series: &CashFlowSeries) -> Vec<FlowRow> {
    series
        .iter()
        .zip(series.cumulative())
        .map(|((period, amount), cumulative)| FlowRow {
            period,
            amount,
            cumulative,
        })
        .collect()
}

/// Metric rows for display, including the base rate and verdict.
pub fn metric_rows(report: &ViabilityReport) -> Vec<KeyValue> {
    let m = &report.metrics;
    vec![
        KeyValue::new("Discount Rate", format_rate(report.base_rate)),
        KeyValue::new("Net Present Value (NPV)", format_amount(m.npv)),
        KeyValue::new("Internal Rate of Return (IRR)", format_rate_opt(m.irr)),
        KeyValue::new("Return on Investment (ROI)", format_percent_opt(m.roi)),
        KeyValue::new("Margin of Safety", format_percent_opt(m.margin_of_safety)),
        KeyValue::new("Payback Period", format_payback(m.payback)),
        KeyValue::new("Recommendation", recommendation_token(report.recommendation)),
    ]
}

/// Sensitivity rows, marking the point nearest the base rate.
pub fn sweep_rows(curve: &SensitivityCurve) -> Vec<SweepRow> {
    let base_index = curve.nearest_to_base();
    curve
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| SweepRow {
            rate: format_rate(p.rate),
            npv: format_amount(p.npv),
            marker: if Some(i) == base_index { "◀ base" } else { "" },
        })
        .collect()
}

fn markdown_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows).with(Style::markdown()).to_string()
}

/// Renders the full viability report as Markdown.
pub fn render_markdown(
    series: &CashFlowSeries,
    report: &ViabilityReport,
    curve: &SensitivityCurve,
) -> String {
    let mut out = format!("# {}\n\n", REPORT_TITLE);

    out.push_str(&format!(
        "Base discount rate: **{}** over {} periods.\n\n",
        format_rate(report.base_rate),
        series.horizon()
    ));

    out.push_str("## Metrics\n\n");
    let metrics: Vec<KeyValue> = metric_rows(report)
        .into_iter()
        .filter(|row| row.key != "Discount Rate" && row.key != "Recommendation")
        .collect();
    out.push_str(&markdown_table(&metrics));
    out.push_str("\n\n");

    if let Some(note) = &report.irr_note {
        out.push_str(&format!("> IRR not available: {}\n\n", note));
    }
    if report.irr_ambiguous {
        out.push_str("> The cash flows change sign more than once; the IRR may not be unique.\n\n");
    }

    out.push_str("## Recommendation\n\n");
    out.push_str(&format!("**{}** {}\n\n", report.recommendation, report.recommendation.message()));

    out.push_str("## Explanations\n\n");
    for (label, text) in EXPLANATIONS {
        out.push_str(&format!("- **{}** is {}\n", label, text));
    }
    out.push('\n');

    out.push_str("## Cash Flows\n\n");
    out.push_str(&markdown_table(&flow_rows(series)));
    out.push_str("\n\n");

    out.push_str("## NPV Sensitivity\n\n");
    out.push_str(&markdown_table(&sweep_rows(curve)));
    out.push('\n');

    out
}
