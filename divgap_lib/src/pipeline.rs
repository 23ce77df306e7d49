//! End-to-end run for one ticker: dividend sources, gap correlation and
//! report annotation. Writing the export is left to the caller so a failed
//! run never touches the output file.

use moex_iss_api::Client;

use crate::config::Config;
use crate::error::DivGapError;
use crate::gap::correlate_all;
use crate::iss::IssSource;
use crate::model::DividendEvent;
use crate::report::{annotate, OutcomeLookup};
use crate::scrape::ProfilePageSource;
use crate::source::{CandleSource, SourceChain};
use crate::validation::validate_ticker;

pub struct Pipeline {
    chain: SourceChain,
    candles: Box<dyn CandleSource>,
    reports: Box<dyn OutcomeLookup>,
}

impl Pipeline {
    pub fn new(
        chain: SourceChain,
        candles: Box<dyn CandleSource>,
        reports: Box<dyn OutcomeLookup>,
    ) -> Self {
        Self {
            chain,
            candles,
            reports,
        }
    }

    /// ISS first, then the profile page; candles always come from ISS.
    pub fn from_config(
        config: &Config,
        reports: Box<dyn OutcomeLookup>,
    ) -> Result<Self, DivGapError> {
        let client = Client::with_base_url(&config.iss_base_url).with_timeout(config.timeout);
        let primary = IssSource::new(client.clone(), Some(config.history_from));
        let secondary = ProfilePageSource::with_base_url(&config.profile_base_url, config.timeout)?;
        let chain = SourceChain::new(vec![Box::new(primary), Box::new(secondary)]);
        let candles = IssSource::new(client, None);
        Ok(Self::new(chain, Box::new(candles), reports))
    }

    /// Runs the whole analysis for `ticker`.
    ///
    /// `on_event` is called after each event is correlated with the event,
    /// the number done so far and the total. Fails with `NoDividends`, before
    /// any candle request, when no source yields a usable dividend.
    pub async fn run<F>(
        &self,
        ticker: &str,
        mut on_event: F,
    ) -> Result<Vec<DividendEvent>, DivGapError>
    where
        F: FnMut(&DividendEvent, usize, usize),
    {
        let ticker = validate_ticker(ticker)?;
        let mut events = self.chain.fetch_events(&ticker).await?;
        let total = events.len();

        let mut done = 0;
        let summary = correlate_all(&mut events, self.candles.as_ref(), |event| {
            done += 1;
            on_event(event, done, total);
        })
        .await;

        annotate(&mut events, self.reports.as_ref());

        tracing::info!(
            "{}: {} events, {} computed, {} insufficient data, {} missing price, {} fetch failed",
            ticker,
            summary.total(),
            summary.computed,
            summary.insufficient_data,
            summary.missing_price,
            summary.fetch_failed
        );
        Ok(events)
    }
}
