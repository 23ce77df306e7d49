//! JSON export of correlated dividend events.

use std::path::Path;

use serde::Serialize;

use crate::error::DivGapError;
use crate::model::DividendEvent;

/// One exported object. Field names are the on-disk contract described by
/// `schema/dividend_event.schema.json`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExportRecord {
    pub date: String,
    pub dividend: f64,
    #[serde(rename = "yield")]
    pub yield_pct: f64,
    #[serde(rename = "gap")]
    pub gap_pct: f64,
    pub ticker: String,
    pub report: String,
    pub pre_price: Option<f64>,
    pub post_price: Option<f64>,
    pub status: &'static str,
}

impl From<&DividendEvent> for ExportRecord {
    fn from(event: &DividendEvent) -> Self {
        Self {
            date: event.date_string(),
            dividend: event.dividend_amount,
            yield_pct: event.yield_pct,
            gap_pct: event.gap_pct,
            ticker: event.ticker.clone(),
            report: event.report_label.clone(),
            pre_price: event.pre_price,
            post_price: event.post_price,
            status: event.outcome.status(),
        }
    }
}

/// Pretty-printed JSON array, one object per event in input order.
/// Non-ASCII text is written as-is.
pub fn to_json_string(events: &[DividendEvent]) -> Result<String, DivGapError> {
    let records: Vec<ExportRecord> = events.iter().map(ExportRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Writes the export to `path`, replacing any existing file.
pub fn write_json(path: &Path, events: &[DividendEvent]) -> Result<(), DivGapError> {
    let json = to_json_string(events)?;
    std::fs::write(path, json)?;
    tracing::info!("wrote {} events to {}", events.len(), path.display());
    Ok(())
}
