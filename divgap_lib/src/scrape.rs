//! HTML scraping of a ticker's dividend profile page (fallback source).

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::StatusCode;

use moex_iss_api::user_agent::get_user_agent;

use crate::error::DivGapError;
use crate::model::RawDividendRow;
use crate::normalize::DateFormat;
use crate::source::DividendSource;

const DEFAULT_BASE_URL: &str = "https://www.dohod.ru/ik/analytics/dividend";
const DEFAULT_DATE_COLUMN: usize = 0;
const DEFAULT_AMOUNT_COLUMN: usize = 1;

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}")]
    HttpStatus { status: StatusCode },
    #[error("no table found in page")]
    MissingTable,
    #[error("parse error: {0}")]
    Parse(String),
}

/// Secondary dividend source: the first `<table>` of a per-ticker HTML page.
///
/// Dates are `DD.MM.YYYY` and amounts use a decimal comma. The header row
/// is skipped; the date and amount cells sit at fixed column positions.
pub struct ProfilePageSource {
    base_url: String,
    http: reqwest::Client,
    date_column: usize,
    amount_column: usize,
}

impl ProfilePageSource {
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            date_column: DEFAULT_DATE_COLUMN,
            amount_column: DEFAULT_AMOUNT_COLUMN,
        })
    }

    /// Overrides which cells hold the ex-date and the amount.
    pub fn with_columns(mut self, date_column: usize, amount_column: usize) -> Self {
        self.date_column = date_column;
        self.amount_column = amount_column;
        self
    }

    pub async fn dividend_rows(&self, ticker: &str) -> Result<Vec<RawDividendRow>, ScrapeError> {
        let url = format!("{}/{}", self.base_url, ticker.to_lowercase());
        let html = self.fetch_html(&url).await?;
        parse_dividend_table(&html, self.date_column, self.amount_column)
    }

    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self
            .http
            .get(url)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "ru-RU,ru;q=0.9,en-US;q=0.8")
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ScrapeError::HttpStatus {
                status: resp.status(),
            });
        }

        Ok(resp.text().await?)
    }
}

#[async_trait]
impl DividendSource for ProfilePageSource {
    fn name(&self) -> &'static str {
        "profile-page"
    }

    fn date_format(&self) -> DateFormat {
        DateFormat::Dotted
    }

    async fn fetch_dividends(&self, ticker: &str) -> Result<Vec<RawDividendRow>, DivGapError> {
        Ok(self.dividend_rows(ticker).await?)
    }
}

/// Extracts (date, amount) cell text from every body row of the first table.
pub fn parse_dividend_table(
    html: &str,
    date_column: usize,
    amount_column: usize,
) -> Result<Vec<RawDividendRow>, ScrapeError> {
    let table_re = compile(r"(?is)<table\b[^>]*>(.*?)</table>")?;
    let row_re = compile(r"(?is)<tr\b[^>]*>(.*?)</tr>")?;
    let cell_re = compile(r"(?is)<t[dh]\b[^>]*>(.*?)</t[dh]>")?;
    let tag_re = compile(r"(?s)<[^>]*>")?;

    let table = table_re
        .captures(html)
        .and_then(|cap| cap.get(1))
        .ok_or(ScrapeError::MissingTable)?
        .as_str();

    let rows = row_re
        .captures_iter(table)
        .skip(1)
        .map(|row| {
            let cells: Vec<String> = cell_re
                .captures_iter(&row[1])
                .map(|cell| cell_text(&tag_re, &cell[1]))
                .collect();
            RawDividendRow {
                date: non_empty(cells.get(date_column)),
                amount: non_empty(cells.get(amount_column)),
            }
        })
        .collect();

    Ok(rows)
}

fn compile(pattern: &str) -> Result<Regex, ScrapeError> {
    Regex::new(pattern).map_err(|e| ScrapeError::Parse(format!("regex compile error: {}", e)))
}

fn non_empty(cell: Option<&String>) -> Option<String> {
    cell.filter(|c| !c.is_empty()).cloned()
}

fn cell_text(tag_re: &Regex, raw: &str) -> String {
    let stripped = tag_re.replace_all(raw, " ");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
