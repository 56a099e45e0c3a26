#![allow(dead_code)]

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use earnings_reaction::PriceSeries;
use market_data_ingestor::models::bar::DailyBar;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `n` consecutive weekdays starting at `start` (or the next weekday after it).
pub fn weekdays(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(n);
    let mut date = start;
    while out.len() < n {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            out.push(date);
        }
        date += Duration::days(1);
    }
    out
}

pub fn flat_bar(date: NaiveDate, close: f64) -> DailyBar {
    DailyBar::new(date, close, close, close, close)
}

/// A series whose bar `i` is dated `dates[i]` and closes at `closes[i]`.
pub fn series(dates: &[NaiveDate], closes: &[f64]) -> PriceSeries {
    assert_eq!(dates.len(), closes.len());
    PriceSeries::from_bars(
        "TEST",
        dates
            .iter()
            .zip(closes)
            .map(|(date, close)| flat_bar(*date, *close))
            .collect(),
    )
}

pub fn assert_close(got: f64, want: f64) {
    assert!(
        (got - want).abs() < 1e-9,
        "expected {want}, got {got}"
    );
}
