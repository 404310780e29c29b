//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use capval_analytics::Recommendation;

use crate::cli::OutputFormat;

/// Text shown for a metric that cannot be computed.
pub const NOT_AVAILABLE: &str = "not available";

/// Text shown when the investment is never recovered.
pub const NOT_REACHED: &str = "not reached";

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints rows as CSV with a header line.
pub fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Formats an amount with two decimals and thousands separators.
pub fn format_amount(value: f64) -> String {
    let digits = format!("{:.2}", value.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && digits.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, fraction)
}

/// Formats a value that is already in percent.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Formats a fractional rate as a percentage.
pub fn format_rate(rate: f64) -> String {
    format_percent(rate * 100.0)
}

/// Formats an optional percentage, "not available" when missing.
pub fn format_percent_opt(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format_percent)
}

/// Formats an optional fractional rate, "not available" when missing.
pub fn format_rate_opt(rate: Option<f64>) -> String {
    rate.map_or_else(|| NOT_AVAILABLE.to_string(), format_rate)
}

/// Formats a payback period, "not reached" when missing.
pub fn format_payback(payback: Option<usize>) -> String {
    match payback {
        Some(1) => "1 period".to_string(),
        Some(periods) => format!("{} periods", periods),
        None => NOT_REACHED.to_string(),
    }
}

/// Lower-case recommendation token.
pub fn recommendation_token(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::Viable => "viable",
        Recommendation::NotViable => "not viable",
    }
}

/// Prints the recommendation message, coloured by verdict.
pub fn print_recommendation(recommendation: Recommendation) {
    let message = recommendation.message();
    if recommendation.is_viable() {
        println!("\n{} {}", "✓".green(), message.green());
    } else {
        println!("\n{} {}", "✗".red(), message.red());
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
