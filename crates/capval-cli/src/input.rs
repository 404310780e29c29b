//! Project input from command-line flags or a file.
//!
//! Flags take the investment as a positive magnitude, the discount rate in
//! percent and the periodic flows as a comma-separated list. Files are
//! either JSON (a serialized `ProjectInput`, rate as a fraction) or CSV
//! with a `period,amount` header where period 0 holds the negative
//! investment.

use clap::Args;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

use capval_core::{CashFlowSeries, DiscountRate, ProjectInput};

use crate::error::{CliError, CliResult};

/// Arguments describing one project.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Initial investment amount (positive)
    #[arg(long)]
    pub investment: Option<f64>,

    /// Base discount rate in percent, e.g. 10 for 10%
    #[arg(long)]
    pub rate: Option<f64>,

    /// Net cash flows for periods 1..n, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub flows: Option<Vec<f64>>,

    /// Read the project from a .json or .csv file instead of flags
    #[arg(long, conflicts_with_all = ["investment", "flows"])]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct FlowRecord {
    period: u32,
    amount: f64,
}

/// Project figures whose rate may still be missing.
struct Loaded {
    input: ProjectInput,
    rate: Option<f64>,
}

impl ProjectArgs {
    /// Builds the project input, requiring a discount rate.
    pub fn project(&self) -> CliResult<ProjectInput> {
        let Loaded { mut input, rate } = self.load()?;
        input.discount_rate =
            rate.ok_or_else(|| CliError::MissingArgument("--rate".to_string()))?;

        tracing::debug!(
            "project: investment {}, rate {}, {} periods",
            input.investment,
            input.discount_rate,
            input.horizon
        );
        Ok(input)
    }

    /// Validated series and base rate.
    pub fn parts(&self) -> CliResult<(CashFlowSeries, DiscountRate)> {
        Ok(self.project()?.into_parts()?)
    }

    /// Validated series alone; the rate is optional here.
    pub fn series(&self) -> CliResult<CashFlowSeries> {
        let Loaded { mut input, rate } = self.load()?;
        input.discount_rate = rate.unwrap_or(0.0);
        Ok(input.to_series()?)
    }

    /// Reads flags or the input file. A `--rate` flag overrides a file rate.
    fn load(&self) -> CliResult<Loaded> {
        let mut loaded = match &self.input {
            Some(path) => read_file(path)?,
            None => self.from_flags()?,
        };
        if let Some(percent) = self.rate {
            loaded.rate = Some(rate_from_percent(percent)?);
        }
        Ok(loaded)
    }

    fn from_flags(&self) -> CliResult<Loaded> {
        let investment = self
            .investment
            .ok_or_else(|| CliError::MissingArgument("--investment (or --input)".to_string()))?;
        let flows = self
            .flows
            .clone()
            .ok_or_else(|| CliError::MissingArgument("--flows (or --input)".to_string()))?;
        Ok(Loaded {
            input: ProjectInput::new(investment, 0.0, flows),
            rate: None,
        })
    }
}

fn rate_from_percent(percent: f64) -> CliResult<f64> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(CliError::InvalidRate(percent));
    }
    Ok(DiscountRate::from_percent(percent)?.value())
}

fn read_file(path: &Path) -> CliResult<Loaded> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => read_json(path),
        Some("csv") => read_csv(path),
        _ => Err(CliError::UnsupportedFile(path.to_path_buf())),
    }
}

fn read_json(path: &Path) -> CliResult<Loaded> {
    let file = File::open(path)?;
    let input: ProjectInput = serde_json::from_reader(file)?;
    tracing::debug!("read JSON project from {}", path.display());
    Ok(Loaded {
        rate: Some(input.discount_rate),
        input,
    })
}

/// CSV rows carry no rate; it must come from `--rate`.
fn read_csv(path: &Path) -> CliResult<Loaded> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = reader
        .deserialize::<FlowRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    records.sort_by_key(|r| r.period);

    let invalid = |message: String| CliError::InvalidFile {
        path: path.to_path_buf(),
        message,
    };

    for (expected, record) in records.iter().enumerate() {
        if record.period as usize != expected {
            return Err(invalid(format!(
                "periods must run 0, 1, 2, ... without gaps or repeats (found {} where {} was expected)",
                record.period, expected
            )));
        }
    }

    let (first, rest) = records
        .split_first()
        .ok_or_else(|| invalid("no cash-flow rows".to_string()))?;
    let flows: Vec<f64> = rest.iter().map(|r| r.amount).collect();

    tracing::debug!("read {} CSV rows from {}", records.len(), path.display());
    Ok(Loaded {
        input: ProjectInput::new(-first.amount, 0.0, flows),
        rate: None,
    })
}
