//! Dividend gap analysis for one ticker, written to a JSON file.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use divgap_lib::validation::{validate_date, validate_ticker};
use divgap_lib::{
    write_json, Config, DivGapError, DividendEvent, GapSummary, Pipeline, ReportTable,
};
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::{print_events_table, summary_line};
use crate::prompt::prompt_ticker;

/// Analysis arguments. Every flag is optional; without `--ticker` the
/// ticker is asked for interactively.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Ticker to analyze (skips the prompt)
    #[arg(long)]
    pub ticker: Option<String>,

    /// Output JSON path (default: data.json or DIVGAP_OUTPUT)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Earnings report YAML (default: built-in table or DIVGAP_REPORTS)
    #[arg(long)]
    pub reports: Option<PathBuf>,

    /// Earliest dividend date to request, YYYY-MM-DD (default: 2015-01-01)
    #[arg(long)]
    pub from: Option<String>,

    /// Also print a summary table to stdout
    #[arg(long)]
    pub table: bool,
}

impl AnalyzeArgs {
    /// Applies flag overrides on top of the environment config.
    fn apply(&self, config: &mut Config) -> Result<(), DivGapError> {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(reports) = &self.reports {
            config.reports = Some(reports.clone());
        }
        if let Some(from) = &self.from {
            config.history_from = validate_date(from)?;
        }
        Ok(())
    }
}

fn load_reports(config: &Config) -> Result<ReportTable> {
    let table = match &config.reports {
        Some(path) => ReportTable::from_path(path)?,
        None => ReportTable::load_default()?,
    };
    tracing::debug!("loaded {} earnings report entries", table.len());
    Ok(table)
}

pub async fn run(args: &AnalyzeArgs) -> Result<()> {
    let mut config = Config::from_env()?;
    args.apply(&mut config)?;

    let ticker = match &args.ticker {
        Some(t) => validate_ticker(t)?,
        None => prompt_ticker(&mut std::io::stdin().lock(), &config.default_ticker)?,
    };

    let reports = load_reports(&config)?;
    let pipeline = Pipeline::from_config(&config, Box::new(reports))?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message(format!("fetching {} dividends...", ticker));

    let result = pipeline
        .run(&ticker, |event, done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
            pb.set_message(format!("{} {}", event.date_string(), event.outcome.status()));
        })
        .await;
    pb.finish_and_clear();

    finish(result, &config, &ticker, args.table)
}

/// Writes the export for a finished run. When neither source had dividends,
/// the failure is logged and no file is created.
fn finish(
    result: Result<Vec<DividendEvent>, DivGapError>,
    config: &Config,
    ticker: &str,
    table: bool,
) -> Result<()> {
    let events = match result {
        Ok(events) => events,
        Err(DivGapError::NoDividends { ticker }) => {
            tracing::error!("no dividend data for {} from any source, nothing written", ticker);
            bail!("no dividend data found for {}", ticker);
        }
        Err(e) => return Err(e.into()),
    };

    write_json(&config.output, &events)?;

    if table {
        print_events_table(&events);
    }
    eprintln!("{}", summary_line(ticker, &GapSummary::from_events(&events)));
    eprintln!("Saved to {}", config.output.display());

    Ok(())
}
