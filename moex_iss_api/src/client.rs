//! HTTP client for the MOEX ISS API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{CandleQuery, DividendQuery, Query},
    types::{CandlesResponse, DividendsResponse},
    user_agent::get_user_agent,
    Error,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the MOEX Informational & Statistical Server (ISS).
///
/// Each request builds a fresh `reqwest::Client` with a randomized browser
/// user agent and a bounded timeout (10 seconds unless overridden). There is
/// no retry: a failed request is reported once and left to the caller.
#[derive(Debug, Clone)]
pub struct Client {
    /// Base URL for the API. Defaults to `https://iss.moex.com`.
    base_api_url: String,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production ISS API.
    pub fn new() -> Self {
        Self {
            base_api_url: "https://iss.moex.com".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn get_url(&self, path: &str, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(query.add_to_url(&url))
    }

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        tracing::debug!("GET {}", url);
        let resp = client
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "ru-RU,ru;q=0.9,en-US;q=0.8")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::warn!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::warn!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::warn!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Fetches the dividend history of a security.
    pub async fn get_dividends(&self, query: &DividendQuery) -> Result<DividendsResponse, Error> {
        self.get::<DividendsResponse, DividendQuery>(&query.path(), query)
            .await
    }

    /// Fetches candles of a security over the query's date range.
    pub async fn get_candles(&self, query: &CandleQuery) -> Result<CandlesResponse, Error> {
        self.get::<CandlesResponse, CandleQuery>(&query.path(), query)
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_body_untouched() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "я".repeat(1500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert!(out.len() < body.len());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = Client::with_base_url("http://localhost:1234/");
        let url = client
            .get_url("/iss/securities/SBER/dividends.json", &DividendQuery::new("SBER"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:1234/iss/securities/SBER/dividends.json?iss.meta=off"
        );
    }

    #[test]
    fn default_timeout_is_ten_seconds() {
        assert_eq!(Client::new().timeout(), Duration::from_secs(10));
        assert_eq!(
            Client::new().with_timeout(Duration::from_secs(3)).timeout(),
            Duration::from_secs(3)
        );
    }
}
