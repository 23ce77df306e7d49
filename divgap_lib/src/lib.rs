//! Library layer for divgap: dividend sources, gap correlation, report
//! annotation and JSON export.
//!
//! Wraps the `moex_iss_api` crate with a fallback HTML source, the
//! price-gap engine, configuration and input validation.

pub mod config;
pub mod error;
pub mod export;
pub mod gap;
pub mod iss;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod scrape;
pub mod source;
pub mod validation;

pub use moex_iss_api;

pub use config::Config;
pub use error::DivGapError;
pub use export::{to_json_string, write_json, ExportRecord};
pub use gap::{correlate, correlate_all, GapSummary};
pub use model::{Candle, DividendEvent, GapOutcome, RawDividendRow};
pub use pipeline::Pipeline;
pub use report::{OutcomeLookup, ReportOutcome, ReportTable, ReportTableError};
pub use scrape::{ProfilePageSource, ScrapeError};
pub use source::{CandleSource, DividendSource, SourceChain};
