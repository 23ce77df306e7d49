//! Interactive ticker prompt.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use divgap_lib::validation::validate_ticker;
use divgap_lib::DivGapError;

/// Empty input selects `default`; anything else must be a valid ticker.
pub fn resolve_ticker(input: &str, default: &str) -> Result<String, DivGapError> {
    if input.trim().is_empty() {
        return Ok(default.to_string());
    }
    validate_ticker(input)
}

/// Asks for a ticker on stderr and reads one line from `reader`.
pub fn prompt_ticker<R: BufRead>(reader: &mut R, default: &str) -> Result<String> {
    eprint!("Enter ticker (default {}): ", default);
    std::io::stderr().flush().ok();

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("failed to read ticker from stdin")?;
    Ok(resolve_ticker(&line, default)?)
}
