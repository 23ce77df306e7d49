//! Candle table returned by the `.../securities/{ticker}/candles.json` endpoint.

use serde::{Deserialize, Serialize};

use super::table::{cell_f64, cell_text, IssTable};
use crate::Error;

const OPEN_COLUMN: (&str, usize) = ("open", 0);
const CLOSE_COLUMN: (&str, usize) = ("close", 1);
const BEGIN_COLUMN: (&str, usize) = ("begin", 6);

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CandlesResponse {
    #[serde(default)]
    pub candles: IssTable,
}

/// Open/close of one candle and the timestamp it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleRecord {
    /// Candle start as `YYYY-MM-DD HH:MM:SS`.
    pub begin: Option<String>,
    pub open: Option<f64>,
    pub close: Option<f64>,
}

impl CandlesResponse {
    pub fn records(&self) -> Result<Vec<CandleRecord>, Error> {
        let table = &self.candles;
        let open_idx = table.column_index(OPEN_COLUMN.0, OPEN_COLUMN.1)?;
        let close_idx = table.column_index(CLOSE_COLUMN.0, CLOSE_COLUMN.1)?;
        let begin_idx = table.column_index(BEGIN_COLUMN.0, BEGIN_COLUMN.1)?;

        Ok(table
            .data
            .iter()
            .map(|row| CandleRecord {
                begin: cell_text(row, begin_idx),
                open: cell_f64(row, open_idx),
                close: cell_f64(row, close_idx),
            })
            .collect())
    }
}
