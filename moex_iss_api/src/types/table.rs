use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

/// A single ISS table: a header of column names and rows of positional cells.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct IssTable {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

impl IssTable {
    /// Resolves a column by name.
    ///
    /// With `iss.meta=off` ISS still sends `columns`, but older mirrors and
    /// hand-built fixtures may not. When the header is empty the well-known
    /// `fallback` position is used; when the header exists but lacks the
    /// column, the table has the wrong shape.
    pub fn column_index(&self, name: &str, fallback: usize) -> Result<usize, Error> {
        if self.columns.is_empty() {
            return Ok(fallback);
        }
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::Malformed(format!("missing column '{}'", name)))
    }
}

/// Cell as text. Numbers are rendered in plain decimal notation, never with
/// an exponent; null, empty strings and nested values yield `None`.
pub(crate) fn cell_text(row: &[Value], idx: usize) -> Option<String> {
    match row.get(idx)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i.to_string()),
            None => n.as_f64().map(|f| format!("{}", f)),
        },
        _ => None,
    }
}

/// Cell as a float. Numeric strings are accepted.
pub(crate) fn cell_f64(row: &[Value], idx: usize) -> Option<f64> {
    match row.get(idx)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
