//! Response types for the ISS API.
//!
//! Every ISS endpoint answers with one or more named tables, each made of a
//! `columns` header and positional `data` rows.

mod candle;
mod dividend;
mod table;

pub use candle::{CandleRecord, CandlesResponse};
pub use dividend::{DividendRecord, DividendsResponse};
pub use table::IssTable;
