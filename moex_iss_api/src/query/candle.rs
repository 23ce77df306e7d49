use chrono::NaiveDate;
use url::Url;

use super::common::{with_envelope, Query};

/// ISS interval code for daily candles.
const DAILY_INTERVAL: &str = "24";

/// Query for daily OHLC candles of one share over a date interval.
#[derive(Clone)]
pub struct CandleQuery {
    pub ticker: String,
    pub from: Option<NaiveDate>,
    pub till: Option<NaiveDate>,
}

impl Query for CandleQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = with_envelope(url);
        if let Some(from) = self.from {
            url.query_pairs_mut()
                .append_pair("from", &from.format("%Y-%m-%d").to_string());
        }
        if let Some(till) = self.till {
            url.query_pairs_mut()
                .append_pair("till", &till.format("%Y-%m-%d").to_string());
        }
        url.query_pairs_mut().append_pair("interval", DAILY_INTERVAL);
        url
    }
}

impl CandleQuery {
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            from: None,
            till: None,
        }
    }

    /// Restricts the candles to `[from, till]`, both inclusive.
    pub fn with_range(mut self, from: NaiveDate, till: NaiveDate) -> Self {
        self.from = Some(from);
        self.till = Some(till);
        self
    }

    /// Path of the share's candle table on the stock engine, relative to the API root.
    pub fn path(&self) -> String {
        format!(
            "/iss/engines/stock/markets/shares/securities/{}/candles.json",
            self.ticker
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use url::Url;

    use super::*;

    #[test]
    fn test_candle_query() {
        let url = Url::parse("https://example.com").unwrap();
        let from = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        let till = NaiveDate::from_ymd_opt(2024, 7, 13).unwrap();

        insta::assert_snapshot!(
            CandleQuery::new("SBER").add_to_url(&url).to_string(),
            @"https://example.com/?iss.meta=off&interval=24"
        );

        insta::assert_snapshot!(
            CandleQuery::new("SBER")
                .with_range(from, till)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/?iss.meta=off&from=2024-07-09&till=2024-07-13&interval=24"
        );
    }

    #[test]
    fn test_candle_path() {
        assert_eq!(
            CandleQuery::new("SBER").path(),
            "/iss/engines/stock/markets/shares/securities/SBER/candles.json"
        );
    }
}
