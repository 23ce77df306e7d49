//! Runtime configuration read from `DIVGAP_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::DivGapError;
use crate::validation::validate_ticker;

pub const DEFAULT_ISS_BASE_URL: &str = "https://iss.moex.com";
pub const DEFAULT_PROFILE_BASE_URL: &str = "https://www.dohod.ru/ik/analytics/dividend";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HISTORY_FROM: &str = "2015-01-01";
pub const DEFAULT_TICKER: &str = "SBER";
pub const DEFAULT_OUTPUT: &str = "data.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub iss_base_url: String,
    pub profile_base_url: String,
    /// Per-request timeout for every HTTP call.
    pub timeout: Duration,
    /// Lower bound of the dividend history request.
    pub history_from: NaiveDate,
    /// Ticker used when the prompt is left empty.
    pub default_ticker: String,
    pub output: PathBuf,
    /// External earnings report table; `None` uses the embedded one.
    pub reports: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, DivGapError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset or blank keys take their
    /// default; present but invalid values are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DivGapError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let iss_base_url = match get("DIVGAP_ISS_BASE_URL") {
            Some(url) => parse_base_url("DIVGAP_ISS_BASE_URL", &url)?,
            None => DEFAULT_ISS_BASE_URL.to_string(),
        };
        let profile_base_url = match get("DIVGAP_PROFILE_BASE_URL") {
            Some(url) => parse_base_url("DIVGAP_PROFILE_BASE_URL", &url)?,
            None => DEFAULT_PROFILE_BASE_URL.to_string(),
        };

        let timeout_secs = match get("DIVGAP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(DivGapError::Config(format!(
                        "DIVGAP_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let history_raw = get("DIVGAP_HISTORY_FROM").unwrap_or_else(|| DEFAULT_HISTORY_FROM.into());
        let history_from = NaiveDate::parse_from_str(&history_raw, "%Y-%m-%d").map_err(|_| {
            DivGapError::Config(format!(
                "DIVGAP_HISTORY_FROM must be YYYY-MM-DD, got '{}'",
                history_raw
            ))
        })?;

        let default_ticker = match get("DIVGAP_DEFAULT_TICKER") {
            Some(raw) => validate_ticker(&raw)
                .map_err(|e| DivGapError::Config(format!("DIVGAP_DEFAULT_TICKER: {}", e)))?,
            None => DEFAULT_TICKER.to_string(),
        };

        let output = PathBuf::from(get("DIVGAP_OUTPUT").unwrap_or_else(|| DEFAULT_OUTPUT.into()));
        let reports = get("DIVGAP_REPORTS").map(PathBuf::from);

        Ok(Self {
            iss_base_url,
            profile_base_url,
            timeout: Duration::from_secs(timeout_secs),
            history_from,
            default_ticker,
            output,
            reports,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iss_base_url: DEFAULT_ISS_BASE_URL.to_string(),
            profile_base_url: DEFAULT_PROFILE_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            history_from: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
            default_ticker: DEFAULT_TICKER.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            reports: None,
        }
    }
}

fn parse_base_url(key: &str, raw: &str) -> Result<String, DivGapError> {
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(DivGapError::Config(format!(
            "{} must be an http(s) URL, got '{}'",
            key, raw
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
