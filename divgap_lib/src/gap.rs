//! Dividend-to-price correlation: selects the prices around each ex-date and
//! derives dividend yield and the opening gap.
//!
//! The arithmetic lives in pure functions ([`select_prices`], [`compute_gap`],
//! [`apply_candles`]); [`correlate`] adds the candle fetch and the failure
//! policy on top. Every failure is local to one event: its figures fall back
//! to zero and the returned [`GapOutcome`] records why.

use chrono::{Duration, NaiveDate};
use tracing::Instrument;

use crate::model::{Candle, DividendEvent, GapOutcome};
use crate::source::CandleSource;

/// Calendar days fetched on each side of the ex-date.
pub const WINDOW_DAYS: i64 = 2;

/// A gap needs at least one candle on each side of the ex-date.
pub const MIN_CANDLES: usize = 2;

/// Inclusive `[ex_date - 2, ex_date + 2]` calendar-day window. Weekends and
/// holidays are not skipped; the window is always five calendar days.
pub fn fetch_window(ex_date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let span = Duration::days(WINDOW_DAYS);
    let from = ex_date.checked_sub_signed(span).unwrap_or(NaiveDate::MIN);
    let till = ex_date.checked_add_signed(span).unwrap_or(NaiveDate::MAX);
    (from, till)
}

/// Prices picked on either side of an ex-date.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceSelection {
    /// Close of the last candle strictly before the ex-date.
    pub pre: Option<f64>,
    /// Open of the first candle on or after the ex-date.
    pub post: Option<f64>,
}

/// Single forward pass over the candles in date order.
///
/// Candles are sorted first (stable, so same-day duplicates keep provider
/// order); the scan stops at the first candle on or after `ex_date`.
pub fn select_prices(ex_date: NaiveDate, candles: &[Candle]) -> PriceSelection {
    let mut sorted = candles.to_vec();
    sorted.sort_by_key(|c| c.date);

    let mut selection = PriceSelection::default();
    for candle in &sorted {
        if candle.date < ex_date {
            selection.pre = Some(candle.close);
        } else {
            selection.post = Some(candle.open);
            break;
        }
    }
    selection
}

/// Yield and gap, both in percent of the pre-ex-date close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapFigures {
    pub yield_pct: f64,
    pub gap_pct: f64,
}

/// Computes `amount / pre * 100` and `(pre - post) / pre * 100`.
///
/// Returns `None` for a zero or non-finite pre price, or whenever either
/// result is not finite.
pub fn compute_gap(dividend_amount: f64, pre: f64, post: f64) -> Option<GapFigures> {
    if pre == 0.0 || !pre.is_finite() {
        return None;
    }
    let yield_pct = dividend_amount / pre * 100.0;
    let gap_pct = (pre - post) / pre * 100.0;
    if !yield_pct.is_finite() || !gap_pct.is_finite() {
        return None;
    }
    Some(GapFigures { yield_pct, gap_pct })
}

/// Fills an event from an already fetched candle window.
///
/// Resets the event first, so applying the same window twice gives the same
/// result. With fewer than [`MIN_CANDLES`] candles no price is recorded.
pub fn apply_candles(event: &mut DividendEvent, candles: &[Candle]) -> GapOutcome {
    event.reset_gap();

    let outcome = if candles.len() < MIN_CANDLES {
        GapOutcome::InsufficientData {
            candles: candles.len(),
        }
    } else {
        let selection = select_prices(event.ex_date, candles);
        event.pre_price = selection.pre;
        event.post_price = selection.post;
        match (selection.pre, selection.post) {
            (Some(pre), Some(post)) => match compute_gap(event.dividend_amount, pre, post) {
                Some(figures) => {
                    event.yield_pct = figures.yield_pct;
                    event.gap_pct = figures.gap_pct;
                    GapOutcome::Computed
                }
                None => GapOutcome::MissingPrice,
            },
            _ => GapOutcome::MissingPrice,
        }
    };

    event.outcome = outcome.clone();
    outcome
}

/// Fetches the candle window for one event and fills it in place.
///
/// Never fails: a fetch error becomes [`GapOutcome::FetchFailed`] with zero
/// figures and no prices. Runs inside a `correlate` span carrying the ticker
/// and ex-date.
pub async fn correlate(event: &mut DividendEvent, source: &dyn CandleSource) -> GapOutcome {
    let span = tracing::info_span!(
        "correlate",
        ticker = %event.ticker,
        ex_date = %event.ex_date
    );
    fill_from_source(event, source).instrument(span).await
}

async fn fill_from_source(event: &mut DividendEvent, source: &dyn CandleSource) -> GapOutcome {
    event.reset_gap();
    let (from, till) = fetch_window(event.ex_date);

    let outcome = match source.fetch_candles(&event.ticker, from, till).await {
        Ok(candles) => apply_candles(event, &candles),
        Err(e) => {
            let outcome = GapOutcome::FetchFailed {
                reason: e.to_string(),
            };
            event.outcome = outcome.clone();
            outcome
        }
    };

    match &outcome {
        GapOutcome::Computed => tracing::debug!(
            "yield {:.2}%, gap {:.2}%",
            event.yield_pct,
            event.gap_pct
        ),
        GapOutcome::InsufficientData { candles } => tracing::warn!(
            "only {} candle(s) in {}..{}, figures set to zero",
            candles,
            from,
            till
        ),
        GapOutcome::MissingPrice => {
            tracing::warn!("no usable price on one side of the ex-date, figures set to zero")
        }
        GapOutcome::FetchFailed { reason } => {
            tracing::warn!("candle request failed ({}), figures set to zero", reason)
        }
        GapOutcome::Pending => {}
    }

    outcome
}

/// Per-outcome counts for a batch of events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GapSummary {
    pub computed: usize,
    pub insufficient_data: usize,
    pub missing_price: usize,
    pub fetch_failed: usize,
}

impl GapSummary {
    pub fn from_events(events: &[DividendEvent]) -> Self {
        let mut summary = Self::default();
        for event in events {
            summary.record(&event.outcome);
        }
        summary
    }

    fn record(&mut self, outcome: &GapOutcome) {
        match outcome {
            GapOutcome::Computed => self.computed += 1,
            GapOutcome::InsufficientData { .. } => self.insufficient_data += 1,
            GapOutcome::MissingPrice => self.missing_price += 1,
            GapOutcome::FetchFailed { .. } => self.fetch_failed += 1,
            GapOutcome::Pending => {}
        }
    }

    pub fn total(&self) -> usize {
        self.computed + self.insufficient_data + self.missing_price + self.fetch_failed
    }
}

/// Correlates every event in order, one candle request at a time.
///
/// `on_event` runs after each event is resolved.
pub async fn correlate_all<F>(
    events: &mut [DividendEvent],
    source: &dyn CandleSource,
    mut on_event: F,
) -> GapSummary
where
    F: FnMut(&DividendEvent),
{
    let mut summary = GapSummary::default();
    for event in events.iter_mut() {
        let outcome = correlate(event, source).await;
        summary.record(&outcome);
        on_event(event);
    }
    summary
}
