//! ISS-backed dividend and candle sources.

use async_trait::async_trait;
use chrono::NaiveDate;
use moex_iss_api::types::CandleRecord;
use moex_iss_api::{CandleQuery, Client, DividendQuery};

use crate::error::DivGapError;
use crate::model::{Candle, RawDividendRow};
use crate::normalize::DateFormat;
use crate::source::{CandleSource, DividendSource};

/// Primary source: structured dividend and candle tables from ISS.
pub struct IssSource {
    client: Client,
    history_from: Option<NaiveDate>,
}

impl IssSource {
    /// `history_from` bounds the dividend history request; `None` asks for all of it.
    pub fn new(client: Client, history_from: Option<NaiveDate>) -> Self {
        Self {
            client,
            history_from,
        }
    }
}

#[async_trait]
impl DividendSource for IssSource {
    fn name(&self) -> &'static str {
        "iss"
    }

    fn date_format(&self) -> DateFormat {
        DateFormat::Iso
    }

    async fn fetch_dividends(&self, ticker: &str) -> Result<Vec<RawDividendRow>, DivGapError> {
        let mut query = DividendQuery::new(ticker);
        if let Some(from) = self.history_from {
            query = query.with_from(from);
        }
        let resp = self.client.get_dividends(&query).await?;
        Ok(resp
            .records()?
            .into_iter()
            .map(|r| RawDividendRow {
                date: r.registry_close_date,
                amount: r.value,
            })
            .collect())
    }
}

#[async_trait]
impl CandleSource for IssSource {
    async fn fetch_candles(
        &self,
        ticker: &str,
        from: NaiveDate,
        till: NaiveDate,
    ) -> Result<Vec<Candle>, DivGapError> {
        let query = CandleQuery::new(ticker).with_range(from, till);
        let resp = self.client.get_candles(&query).await?;
        let records = resp.records()?;
        let total = records.len();
        let candles: Vec<Candle> = records.iter().filter_map(candle_from_record).collect();
        if candles.len() < total {
            tracing::debug!(
                "{}: dropped {} of {} candles with missing fields",
                ticker,
                total - candles.len(),
                total
            );
        }
        Ok(candles)
    }
}

/// Converts an ISS candle row, discarding rows with a missing or unparseable
/// timestamp or a non-finite price.
pub(crate) fn candle_from_record(record: &CandleRecord) -> Option<Candle> {
    let begin = record.begin.as_deref()?;
    let day = begin.split_whitespace().next()?;
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    let open = record.open.filter(|v| v.is_finite())?;
    let close = record.close.filter(|v| v.is_finite())?;
    Some(Candle::new(date, open, close))
}
