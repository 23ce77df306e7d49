use chrono::NaiveDate;
use url::Url;

use super::common::{with_envelope, Query};

/// Query for the per-security dividend history table.
#[derive(Clone)]
pub struct DividendQuery {
    pub ticker: String,
    pub from: Option<NaiveDate>,
}

impl Query for DividendQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = with_envelope(url);
        if let Some(from) = self.from {
            url.query_pairs_mut()
                .append_pair("from", &from.format("%Y-%m-%d").to_string());
        }
        url
    }
}

impl DividendQuery {
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            from: None,
        }
    }

    /// Only return dividends with a registry-closure date on or after `from`.
    pub fn with_from(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    /// Path of the dividend table for this security, relative to the API root.
    pub fn path(&self) -> String {
        format!("/iss/securities/{}/dividends.json", self.ticker)
    }
}
