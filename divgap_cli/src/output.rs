use divgap_lib::{DividendEvent, GapSummary};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Ex-date")]
    date: String,
    #[tabled(rename = "Dividend")]
    dividend: String,
    #[tabled(rename = "Pre close")]
    pre_price: String,
    #[tabled(rename = "Post open")]
    post_price: String,
    #[tabled(rename = "Yield %")]
    yield_pct: String,
    #[tabled(rename = "Gap %")]
    gap_pct: String,
    #[tabled(rename = "Report")]
    report: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn format_price(price: Option<f64>) -> String {
    price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "-".to_string())
}

fn format_pct(value: f64) -> String {
    format!("{:.2}", value)
}

fn build_event_rows(events: &[DividendEvent]) -> Vec<EventRow> {
    events
        .iter()
        .map(|e| EventRow {
            date: e.date_string(),
            dividend: format!("{:.2}", e.dividend_amount),
            pre_price: format_price(e.pre_price),
            post_price: format_price(e.post_price),
            yield_pct: format_pct(e.yield_pct),
            gap_pct: format_pct(e.gap_pct),
            report: e.report_label.clone(),
            status: e.outcome.status().to_string(),
        })
        .collect()
}

pub fn print_events_table(events: &[DividendEvent]) {
    println!("{}", Table::new(build_event_rows(events)));
}

pub fn summary_line(ticker: &str, summary: &GapSummary) -> String {
    format!(
        "{}: {} dividend events, {} with a computed gap, {} without",
        ticker,
        summary.total(),
        summary.computed,
        summary.total() - summary.computed
    )
}
