//! Earnings report lookup for dividend events.
//!
//! Each entry maps a (ticker, date) pair to the profit change reported around
//! that dividend. The sign of the change becomes a positive/negative label on
//! the event; everything else is labelled unknown.
//!
//! The default table ships inside the binary (`seed_data/earnings_reports.yml`);
//! an external YAML file with the same layout can replace it at runtime.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{DividendEvent, UNKNOWN_REPORT_LABEL};

#[derive(Error, Debug)]
pub enum ReportTableError {
    #[error("Failed to parse earnings report YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Failed to read earnings report file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Duplicate earnings report entry: {0}")]
    DuplicateEntry(String),
    #[error("Invalid report date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Top-level structure of the report YAML file.
#[derive(Deserialize, Debug)]
pub struct ReportTableFile {
    #[serde(default)]
    pub labels: Option<ReportLabels>,
    #[serde(default)]
    pub reports: Vec<ReportEntry>,
}

/// A single report entry. `date` is kept as text and validated on load.
#[derive(Deserialize, Debug, Clone)]
pub struct ReportEntry {
    pub ticker: String,
    pub date: String,
    pub profit_change: f64,
}

/// Strings written into `report_label` for each outcome.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReportLabels {
    #[serde(default = "default_positive")]
    pub positive: String,
    #[serde(default = "default_negative")]
    pub negative: String,
    #[serde(default = "default_unknown")]
    pub unknown: String,
}

fn default_positive() -> String {
    ReportOutcome::Positive.as_str().to_string()
}

fn default_negative() -> String {
    ReportOutcome::Negative.as_str().to_string()
}

fn default_unknown() -> String {
    UNKNOWN_REPORT_LABEL.to_string()
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            positive: default_positive(),
            negative: default_negative(),
            unknown: default_unknown(),
        }
    }
}

impl ReportLabels {
    pub fn for_outcome(&self, outcome: ReportOutcome) -> &str {
        match outcome {
            ReportOutcome::Positive => &self.positive,
            ReportOutcome::Negative => &self.negative,
            ReportOutcome::Unknown => &self.unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Positive,
    Negative,
    Unknown,
}

impl ReportOutcome {
    /// Classifies a profit change. Zero and non-finite values are unknown.
    pub fn from_profit_change(change: f64) -> Self {
        if !change.is_finite() || change == 0.0 {
            ReportOutcome::Unknown
        } else if change > 0.0 {
            ReportOutcome::Positive
        } else {
            ReportOutcome::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportOutcome::Positive => "positive",
            ReportOutcome::Negative => "negative",
            ReportOutcome::Unknown => UNKNOWN_REPORT_LABEL,
        }
    }
}

/// Anything that can classify the earnings report for a dividend.
pub trait OutcomeLookup: Send + Sync {
    fn outcome(&self, ticker: &str, date: NaiveDate) -> ReportOutcome;

    /// Label text for an outcome.
    fn label(&self, outcome: ReportOutcome) -> String {
        outcome.as_str().to_string()
    }
}

/// In-memory report table keyed by upper-cased ticker and date.
#[derive(Debug, Clone, Default)]
pub struct ReportTable {
    entries: HashMap<(String, NaiveDate), f64>,
    labels: ReportLabels,
}

impl ReportTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> &ReportLabels {
        &self.labels
    }

    /// Loads the table embedded at build time.
    pub fn load_default() -> Result<Self, ReportTableError> {
        let yaml_content = include_str!("../../seed_data/earnings_reports.yml");
        parse_report_table(yaml_content)
    }

    pub fn from_path(path: &Path) -> Result<Self, ReportTableError> {
        let yaml_content = std::fs::read_to_string(path)?;
        parse_report_table(&yaml_content)
    }

    /// The label for `(ticker, date)`, or the unknown label when absent.
    pub fn label_for(&self, ticker: &str, date: NaiveDate) -> &str {
        self.labels.for_outcome(self.outcome(ticker, date))
    }
}

impl OutcomeLookup for ReportTable {
    fn outcome(&self, ticker: &str, date: NaiveDate) -> ReportOutcome {
        self.entries
            .get(&(ticker.trim().to_uppercase(), date))
            .map(|change| ReportOutcome::from_profit_change(*change))
            .unwrap_or(ReportOutcome::Unknown)
    }

    fn label(&self, outcome: ReportOutcome) -> String {
        self.labels.for_outcome(outcome).to_string()
    }
}

/// Parses a report table from YAML content.
///
/// Rejects unparseable dates and duplicate (ticker, date) keys; tickers are
/// compared case-insensitively.
pub fn parse_report_table(yaml_content: &str) -> Result<ReportTable, ReportTableError> {
    let file: ReportTableFile = serde_yml::from_str(yaml_content)?;

    let mut entries = HashMap::new();
    for entry in file.reports {
        let date = NaiveDate::parse_from_str(entry.date.trim(), "%Y-%m-%d")
            .map_err(|_| ReportTableError::InvalidDate(entry.date.clone()))?;
        let key = (entry.ticker.trim().to_uppercase(), date);
        if entries.contains_key(&key) {
            return Err(ReportTableError::DuplicateEntry(format!("{} {}", key.0, date)));
        }
        entries.insert(key, entry.profit_change);
    }

    Ok(ReportTable {
        entries,
        labels: file.labels.unwrap_or_default(),
    })
}

/// Sets `report_label` on every event. No other field is touched.
pub fn annotate(events: &mut [DividendEvent], lookup: &dyn OutcomeLookup) {
    for event in events.iter_mut() {
        let outcome = lookup.outcome(&event.ticker, event.ex_date);
        event.report_label = lookup.label(outcome);
    }
}
