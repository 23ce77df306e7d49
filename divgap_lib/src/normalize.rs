//! Turns raw provider rows into canonical dividend events.
//!
//! Each row is judged on its own: a missing or unparseable date or amount
//! drops that row and nothing else. Accepted rows keep their input order.

use chrono::NaiveDate;

use crate::model::{DividendEvent, RawDividendRow};

/// Date layout a source uses for ex-dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `YYYY-MM-DD`, used by the ISS API.
    Iso,
    /// `DD.MM.YYYY`, used by localized profile pages.
    Dotted,
}

impl DateFormat {
    fn pattern(self) -> &'static str {
        match self {
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::Dotted => "%d.%m.%Y",
        }
    }
}

/// Parses an ex-date in the given layout.
///
/// Only the first whitespace-separated token is considered, so a trailing
/// time (`2024-07-11 00:00:00`) or footnote marker does not reject the row.
pub fn parse_ex_date(raw: &str, format: DateFormat) -> Option<NaiveDate> {
    let token = raw.split_whitespace().next()?;
    NaiveDate::parse_from_str(token, format.pattern()).ok()
}

/// Parses a per-share dividend amount.
///
/// The whole value is parsed first (`.` or `,` as the fraction separator,
/// whitespace ignored). Failing that, a leading number with digit-grouping
/// spaces (including non-breaking and thin spaces) is taken, and the rest
/// must be currency text: a symbol, or a word separated by a space. A number
/// running straight into a letter (`12abc`) is rejected. The result must be
/// finite and strictly positive.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let value = match compact.parse::<f64>() {
        Ok(value) => value,
        Err(_) => parse_amount_with_suffix(raw.trim())?,
    };
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

fn parse_amount_with_suffix(raw: &str) -> Option<f64> {
    let split = raw
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == ',' || c.is_whitespace()))
        .map(|(idx, _)| idx)
        .unwrap_or(raw.len());
    let (number, suffix) = raw.split_at(split);

    if let Some(first) = suffix.chars().next() {
        let glued = number.chars().last().is_some_and(|c| !c.is_whitespace());
        if first.is_alphanumeric() && glued {
            return None;
        }
    }

    let numeric: String = number
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if !numeric.chars().any(|c| c.is_ascii_digit()) || numeric.matches('.').count() > 1 {
        return None;
    }
    numeric.parse().ok()
}

/// Builds one event per acceptable row.
pub fn normalize_rows(
    ticker: &str,
    rows: &[RawDividendRow],
    format: DateFormat,
) -> Vec<DividendEvent> {
    let mut events = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let (Some(raw_date), Some(raw_amount)) = (row.date.as_deref(), row.amount.as_deref())
        else {
            tracing::debug!("{} row {}: missing date or amount, skipping", ticker, idx);
            continue;
        };
        let Some(ex_date) = parse_ex_date(raw_date, format) else {
            tracing::debug!("{} row {}: unparseable date '{}', skipping", ticker, idx, raw_date);
            continue;
        };
        let Some(amount) = parse_amount(raw_amount) else {
            tracing::debug!(
                "{} row {}: unparseable amount '{}', skipping",
                ticker,
                idx,
                raw_amount
            );
            continue;
        };
        events.push(DividendEvent::new(ticker, ex_date, amount));
    }

    let skipped = rows.len() - events.len();
    if skipped > 0 {
        tracing::info!(
            "{}: accepted {} of {} dividend rows ({} skipped)",
            ticker,
            events.len(),
            rows.len(),
            skipped
        );
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use moex_iss_api::types::DividendsResponse;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_and_dotted_dates_agree() {
        assert_eq!(parse_ex_date("2024-07-11", DateFormat::Iso), Some(date(2024, 7, 11)));
        assert_eq!(parse_ex_date("11.07.2024", DateFormat::Dotted), Some(date(2024, 7, 11)));
        assert_eq!(
            parse_ex_date("2024-07-11", DateFormat::Iso),
            parse_ex_date("11.07.2024", DateFormat::Dotted)
        );
    }

    #[test]
    fn date_with_trailing_time() {
        assert_eq!(
            parse_ex_date(" 2024-07-11 00:00:00", DateFormat::Iso),
            Some(date(2024, 7, 11))
        );
    }

    #[test]
    fn date_in_wrong_format_is_rejected() {
        assert_eq!(parse_ex_date("11.07.2024", DateFormat::Iso), None);
        assert_eq!(parse_ex_date("2024-07-11", DateFormat::Dotted), None);
        assert_eq!(parse_ex_date("2024-02-30", DateFormat::Iso), None);
        assert_eq!(parse_ex_date("", DateFormat::Iso), None);
    }

    #[test]
    fn amount_variants() {
        assert_eq!(parse_amount("33.3"), Some(33.3));
        assert_eq!(parse_amount("33,30"), Some(33.3));
        assert_eq!(parse_amount(" 16 "), Some(16.0));
        assert_eq!(parse_amount("1\u{a0}234,5"), Some(1234.5));
        assert_eq!(parse_amount("18,7 ₽"), Some(18.7));
        assert_eq!(parse_amount("0.5 RUB"), Some(0.5));
    }

    #[test]
    fn amount_rejects_garbage_zero_and_negative() {
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("0,00"), None);
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }

    #[test]
    fn amount_in_exponent_form_keeps_its_magnitude() {
        assert_eq!(parse_amount("1e-6"), Some(0.000001));
        assert_eq!(parse_amount("1.5e2"), Some(150.0));
        assert_eq!(parse_amount("1e400"), None);
    }

    #[test]
    fn amount_glued_to_letters_is_rejected() {
        assert_eq!(parse_amount("12abc"), None);
        assert_eq!(parse_amount("25RUB"), None);
        assert_eq!(parse_amount("25 RUB"), Some(25.0));
        assert_eq!(parse_amount("25₽"), Some(25.0));
    }

    #[test]
    fn tiny_iss_amount_survives_normalization() {
        let resp: DividendsResponse = serde_json::from_value(serde_json::json!({
            "dividends": {
                "columns": ["secid", "isin", "registryclosedate", "value", "currencyid"],
                "data": [["SBER", "RU0009029540", "2024-07-11", 0.000001, "RUB"]]
            }
        }))
        .unwrap();
        let rows: Vec<RawDividendRow> = resp
            .records()
            .unwrap()
            .into_iter()
            .map(|r| RawDividendRow {
                date: r.registry_close_date,
                amount: r.value,
            })
            .collect();

        let events = normalize_rows("SBER", &rows, DateFormat::Iso);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].dividend_amount, 0.000001);
    }

    #[test]
    fn normalize_keeps_valid_rows_in_order() {
        let rows = vec![
            RawDividendRow::new(Some("2023-05-11"), Some("25")),
            RawDividendRow::new(None, Some("18.7")),
            RawDividendRow::new(Some("2022-05-12"), None),
            RawDividendRow::new(Some("bad"), Some("1")),
            RawDividendRow::new(Some("2021-05-12"), Some("oops")),
            RawDividendRow::new(Some("2019-06-13"), Some("16")),
        ];
        let events = normalize_rows("SBER", &rows, DateFormat::Iso);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].date_string(), "2023-05-11");
        assert_eq!(events[0].dividend_amount, 25.0);
        assert_eq!(events[1].date_string(), "2019-06-13");
        assert!(events.iter().all(|e| e.ticker == "SBER"));
    }

    #[test]
    fn normalize_dotted_rows() {
        let rows = vec![
            RawDividendRow::new(Some("11.07.2024"), Some("33,30")),
            RawDividendRow::new(Some("11.05.2023"), Some("25,00")),
        ];
        let events = normalize_rows("SBER", &rows, DateFormat::Dotted);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].date_string(), "2024-07-11");
        assert_eq!(events[0].dividend_amount, 33.3);
    }

    #[test]
    fn normalize_empty_input() {
        assert!(normalize_rows("SBER", &[], DateFormat::Iso).is_empty());
    }
}
