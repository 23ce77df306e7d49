//! Error types for the library layer.

use std::fmt;

use crate::report::ReportTableError;
use crate::scrape::ScrapeError;

/// Errors produced by the library layer, wrapping upstream API and scrape
/// errors and adding configuration, I/O and input validation failures.
#[derive(Debug)]
pub enum DivGapError {
    /// An error from the ISS API client.
    Api(moex_iss_api::Error),
    /// The secondary profile-page source failed.
    Scrape(ScrapeError),
    /// The earnings report table could not be loaded.
    Reports(ReportTableError),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// Reading or writing a file failed.
    Io(std::io::Error),
    /// A configuration value was present but invalid.
    Config(String),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// No dividend source produced a single usable event.
    NoDividends { ticker: String },
}

impl fmt::Display for DivGapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Scrape(e) => write!(f, "Scrape error: {}", e),
            Self::Reports(e) => write!(f, "Report table error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::NoDividends { ticker } => {
                write!(f, "No dividend data found for {} in any source", ticker)
            }
        }
    }
}

impl std::error::Error for DivGapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Scrape(e) => Some(e),
            Self::Reports(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<moex_iss_api::Error> for DivGapError {
    fn from(e: moex_iss_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<ScrapeError> for DivGapError {
    fn from(e: ScrapeError) -> Self {
        Self::Scrape(e)
    }
}

impl From<ReportTableError> for DivGapError {
    fn from(e: ReportTableError) -> Self {
        Self::Reports(e)
    }
}

impl From<serde_json::Error> for DivGapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<std::io::Error> for DivGapError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
