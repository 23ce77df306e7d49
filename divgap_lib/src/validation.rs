use chrono::NaiveDate;

use crate::error::DivGapError;

pub const MAX_TICKER_LENGTH: usize = 12;
pub const MAX_INPUT_LENGTH: usize = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, DivGapError> {
    if input.len() > max_len {
        return Err(DivGapError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(DivGapError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a ticker: trim, upper-case, 1-12 chars of `A-Z`, `0-9`, `.`, `_`, `-`.
pub fn validate_ticker(input: &str) -> Result<String, DivGapError> {
    let cleaned = sanitize_text(input, MAX_INPUT_LENGTH)?;
    if !cleaned
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(DivGapError::InvalidInput(format!(
            "ticker '{}' may only contain letters, digits, '.', '_' and '-'",
            cleaned
        )));
    }
    if cleaned.len() > MAX_TICKER_LENGTH {
        return Err(DivGapError::InvalidInput(format!(
            "ticker '{}' is longer than {} characters",
            cleaned, MAX_TICKER_LENGTH
        )));
    }
    Ok(cleaned.to_ascii_uppercase())
}

/// Validate a `YYYY-MM-DD` date.
pub fn validate_date(input: &str) -> Result<NaiveDate, DivGapError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        DivGapError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2015-01-01)",
            trimmed
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Ticker validation --

    #[test]
    fn ticker_lowercase_is_upper_cased() {
        assert_eq!(validate_ticker("sber").unwrap(), "SBER");
    }

    #[test]
    fn ticker_trimmed() {
        assert_eq!(validate_ticker("  gazp \n").unwrap(), "GAZP");
    }

    #[test]
    fn ticker_with_punctuation() {
        assert_eq!(validate_ticker("sberp-rm").unwrap(), "SBERP-RM");
        assert_eq!(validate_ticker("brk.b").unwrap(), "BRK.B");
    }

    #[test]
    fn ticker_empty() {
        assert!(validate_ticker("").is_err());
        assert!(validate_ticker("   ").is_err());
    }

    #[test]
    fn ticker_too_long() {
        assert!(validate_ticker("ABCDEFGHIJKLM").is_err());
        assert!(validate_ticker("ABCDEFGHIJKL").is_ok());
    }

    #[test]
    fn ticker_rejects_path_and_query_characters() {
        assert!(validate_ticker("SBER/../x").is_err());
        assert!(validate_ticker("SBER?a=1").is_err());
        assert!(validate_ticker("SB ER").is_err());
    }

    #[test]
    fn ticker_unicode() {
        assert!(validate_ticker("СБЕР").is_err());
    }

    #[test]
    fn ticker_non_ascii_that_upper_cases_to_ascii() {
        assert!(validate_ticker("straße").is_err());
        assert!(validate_ticker("ﬁx").is_err());
    }

    // -- Sanitization --

    #[test]
    fn sanitize_strips_control_chars() {
        assert_eq!(sanitize_text("a\u{0007}b\tc", 10).unwrap(), "abc");
    }

    #[test]
    fn sanitize_enforces_length() {
        assert!(sanitize_text("abcdef", 5).is_err());
    }

    // -- Dates --

    #[test]
    fn date_valid() {
        assert_eq!(
            validate_date(" 2015-01-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
        );
    }

    #[test]
    fn date_invalid() {
        assert!(validate_date("01.01.2015").is_err());
        assert!(validate_date("2015-13-01").is_err());
        assert!(validate_date("").is_err());
    }
}
