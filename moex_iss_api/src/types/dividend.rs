//! Dividend history table returned by `/iss/securities/{ticker}/dividends.json`.

use serde::{Deserialize, Serialize};

use super::table::{cell_text, IssTable};
use crate::Error;

const DATE_COLUMN: (&str, usize) = ("registryclosedate", 2);
const VALUE_COLUMN: (&str, usize) = ("value", 3);
const CURRENCY_COLUMN: (&str, usize) = ("currencyid", 4);

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DividendsResponse {
    #[serde(default)]
    pub dividends: IssTable,
}

/// One dividend row, with cells kept as the text the API sent.
///
/// Parsing is left to the caller so that malformed rows can be skipped
/// individually instead of failing the whole response.
#[derive(Debug, Clone, PartialEq)]
pub struct DividendRecord {
    /// Registry-closure (ex-dividend) date, normally `YYYY-MM-DD`.
    pub registry_close_date: Option<String>,
    /// Amount per share.
    pub value: Option<String>,
    pub currency: Option<String>,
}

impl DividendsResponse {
    /// Extracts the date, amount and currency of every row, in API order.
    pub fn records(&self) -> Result<Vec<DividendRecord>, Error> {
        let table = &self.dividends;
        let date_idx = table.column_index(DATE_COLUMN.0, DATE_COLUMN.1)?;
        let value_idx = table.column_index(VALUE_COLUMN.0, VALUE_COLUMN.1)?;
        // Currency is informational only; a header without it is still usable.
        let currency_idx = table.column_index(CURRENCY_COLUMN.0, CURRENCY_COLUMN.1).ok();

        Ok(table
            .data
            .iter()
            .map(|row| DividendRecord {
                registry_close_date: cell_text(row, date_idx),
                value: cell_text(row, value_idx),
                currency: currency_idx.and_then(|idx| cell_text(row, idx)),
            })
            .collect())
    }
}
