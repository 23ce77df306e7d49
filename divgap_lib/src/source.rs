//! Capability traits for data sources and the ordered dividend source chain.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::DivGapError;
use crate::model::{Candle, DividendEvent, RawDividendRow};
use crate::normalize::{normalize_rows, DateFormat};

/// Anything that can list a ticker's historical dividends.
#[async_trait]
pub trait DividendSource: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Layout of the ex-dates this source returns.
    fn date_format(&self) -> DateFormat;

    /// Fetch raw (date, amount) rows in source order.
    async fn fetch_dividends(&self, ticker: &str) -> Result<Vec<RawDividendRow>, DivGapError>;
}

/// Anything that can return daily candles for a date interval.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetch daily candles with trading days in `[from, till]`, both inclusive.
    async fn fetch_candles(
        &self,
        ticker: &str,
        from: NaiveDate,
        till: NaiveDate,
    ) -> Result<Vec<Candle>, DivGapError>;
}

/// Dividend sources tried in priority order.
///
/// The first source whose rows normalize to at least one event wins. A
/// source that errors counts as empty so the next one still gets a chance.
pub struct SourceChain {
    sources: Vec<Box<dyn DividendSource>>,
}

impl SourceChain {
    pub fn new(sources: Vec<Box<dyn DividendSource>>) -> Self {
        Self { sources }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Returns the normalized events of the first non-empty source.
    pub async fn fetch_events(&self, ticker: &str) -> Result<Vec<DividendEvent>, DivGapError> {
        for source in &self.sources {
            let rows = match source.fetch_dividends(ticker).await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!("{}: {} dividend source failed: {}", ticker, source.name(), e);
                    continue;
                }
            };
            let events = normalize_rows(ticker, &rows, source.date_format());
            if events.is_empty() {
                tracing::warn!(
                    "{}: {} returned no usable dividends ({} raw rows), trying next source",
                    ticker,
                    source.name(),
                    rows.len()
                );
                continue;
            }
            tracing::info!(
                "{}: {} dividend events from {}",
                ticker,
                events.len(),
                source.name()
            );
            return Ok(events);
        }

        Err(DivGapError::NoDividends {
            ticker: ticker.to_string(),
        })
    }
}
