//! Dividend events, daily candles and the raw rows sources hand back.

use chrono::NaiveDate;

/// Label attached to an event whose earnings report is not in the table.
pub const UNKNOWN_REPORT_LABEL: &str = "unknown";

/// One (date, amount) pair exactly as a dividend source delivered it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDividendRow {
    pub date: Option<String>,
    pub amount: Option<String>,
}

impl RawDividendRow {
    pub fn new(date: Option<&str>, amount: Option<&str>) -> Self {
        Self {
            date: date.map(str::to_string),
            amount: amount.map(str::to_string),
        }
    }
}

/// A daily candle. Only the trading day survives; time-of-day is discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(date: NaiveDate, open: f64, close: f64) -> Self {
        Self { date, open, close }
    }
}

/// How the gap figures of an event were arrived at.
///
/// `yield_pct`/`gap_pct` are zero for every outcome except `Computed`, so this
/// is what tells a real zero gap apart from one that could not be computed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GapOutcome {
    /// Correlation has not run yet.
    #[default]
    Pending,
    Computed,
    /// The candle window held fewer than two usable candles.
    InsufficientData { candles: usize },
    /// Candles were present but no pre or post price could be selected, or
    /// the pre price was zero.
    MissingPrice,
    /// The candle request failed (timeout, HTTP status, malformed payload).
    FetchFailed { reason: String },
}

impl GapOutcome {
    /// Short machine-readable name used in exports.
    pub fn status(&self) -> &'static str {
        match self {
            GapOutcome::Pending => "pending",
            GapOutcome::Computed => "computed",
            GapOutcome::InsufficientData { .. } => "insufficient_data",
            GapOutcome::MissingPrice => "missing_price",
            GapOutcome::FetchFailed { .. } => "fetch_failed",
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, GapOutcome::Computed)
    }
}

/// A single dividend ex-date and everything derived for it during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct DividendEvent {
    pub ticker: String,
    /// Registry-closure / ex-dividend date.
    pub ex_date: NaiveDate,
    /// Amount paid per share. Always positive and finite.
    pub dividend_amount: f64,
    /// Close of the last trading day strictly before `ex_date`.
    pub pre_price: Option<f64>,
    /// Open of the first trading day on or after `ex_date`.
    pub post_price: Option<f64>,
    pub yield_pct: f64,
    pub gap_pct: f64,
    pub outcome: GapOutcome,
    pub report_label: String,
}

impl DividendEvent {
    pub fn new(ticker: &str, ex_date: NaiveDate, dividend_amount: f64) -> Self {
        Self {
            ticker: ticker.to_string(),
            ex_date,
            dividend_amount,
            pre_price: None,
            post_price: None,
            yield_pct: 0.0,
            gap_pct: 0.0,
            outcome: GapOutcome::Pending,
            report_label: UNKNOWN_REPORT_LABEL.to_string(),
        }
    }

    /// Canonical `YYYY-MM-DD` form of the ex-date.
    pub fn date_string(&self) -> String {
        self.ex_date.format("%Y-%m-%d").to_string()
    }

    /// Clears everything the correlation engine writes.
    pub(crate) fn reset_gap(&mut self) {
        self.pre_price = None;
        self.post_price = None;
        self.yield_pct = 0.0;
        self.gap_pct = 0.0;
        self.outcome = GapOutcome::Pending;
    }
}
