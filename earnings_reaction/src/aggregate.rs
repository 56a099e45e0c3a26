//! Earnings reaction aggregator.
//!
//! For every announcement date the aggregator looks up the close one trading
//! day before and one trading day after the announcement bar, plus (when the
//! series is long enough) the close seven trading days after. Announcements
//! that cannot supply the first two closes are skipped, never filled in.
//!
//! Records are computed oldest first and handed out newest first.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::{
    announcements::normalize,
    errors::ReactionError,
    series::{PriceSeries, Unavailable},
    stats,
};

/// Offset of the pre-announcement close.
pub const BEFORE_OFFSET: isize = -1;

/// Post-announcement comparison point, in trading days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Horizon {
    /// One trading day after the announcement bar.
    OneDay,
    /// Seven trading days after the announcement bar.
    SevenDay,
}

impl Horizon {
    /// Both horizons, shortest first.
    pub const ALL: [Horizon; 2] = [Horizon::OneDay, Horizon::SevenDay];

    /// Trading-day offset from the announcement bar.
    pub fn offset(self) -> isize {
        match self {
            Horizon::OneDay => 1,
            Horizon::SevenDay => 7,
        }
    }

    /// Column label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Horizon::OneDay => "+1D",
            Horizon::SevenDay => "+7D",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `100 * (after - before) / before`.
pub fn percent_change(before: f64, after: f64) -> f64 {
    100.0 * (after - before) / before
}

/// Price reaction around one announcement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionRecord {
    /// Date of the announcement bar.
    pub announcement_date: NaiveDate,
    /// Close one trading day before the announcement bar.
    pub close_before: f64,
    /// Close one trading day after the announcement bar.
    pub close_after_1d: f64,
    /// Percent change from `close_before` to `close_after_1d`.
    pub change_1d_pct: f64,
    /// Close seven trading days after, when the series reaches that far.
    pub close_after_7d: Option<f64>,
    /// Percent change from `close_before` to `close_after_7d`.
    pub change_7d_pct: Option<f64>,
}

impl ReactionRecord {
    /// Percent change at `horizon`, if present.
    pub fn change(&self, horizon: Horizon) -> Option<f64> {
        match horizon {
            Horizon::OneDay => Some(self.change_1d_pct),
            Horizon::SevenDay => self.change_7d_pct,
        }
    }
}

/// Why an announcement contributed no record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// The before or +1 close could not be resolved.
    Missing(Unavailable),
    /// The before close is zero or negative, so no percent change exists.
    NonPositiveClose(f64),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Missing(reason) => write!(f, "{reason}"),
            SkipReason::NonPositiveClose(close) => write!(f, "non-positive close {close}"),
        }
    }
}

/// An announcement that was dropped, and why.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkippedAnnouncement {
    /// The dropped announcement date.
    pub date: NaiveDate,
    /// What was missing.
    pub reason: SkipReason,
}

/// Symmetric price range of plus or minus one standard deviation around an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedRange {
    /// Price the range is centred on (the latest close).
    pub anchor: f64,
    /// Standard deviation of the percent changes, in percent.
    pub sigma_pct: f64,
    /// `anchor * (1 - sigma_pct / 100)`.
    pub low: f64,
    /// `anchor * (1 + sigma_pct / 100)`.
    pub high: f64,
}

impl ExpectedRange {
    /// Builds the range for a given sigma.
    pub fn from_sigma(anchor: f64, sigma_pct: f64) -> Self {
        Self {
            anchor,
            sigma_pct,
            low: anchor * (1.0 - sigma_pct / 100.0),
            high: anchor * (1.0 + sigma_pct / 100.0),
        }
    }

    /// Distance from the anchor to either bound.
    pub fn half_width(&self) -> f64 {
        (self.high - self.low) / 2.0
    }
}

/// Output of [`build`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateResult {
    records: Vec<ReactionRecord>,
    skipped: Vec<SkippedAnnouncement>,
}

impl AggregateResult {
    /// Records, newest announcement first.
    pub fn records(&self) -> &[ReactionRecord] {
        &self.records
    }

    /// Announcements that produced no record, oldest first.
    pub fn skipped(&self) -> &[SkippedAnnouncement] {
        &self.skipped
    }

    /// Present values of one change column, newest first.
    pub fn column(&self, horizon: Horizon) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|record| record.change(horizon))
            .collect()
    }

    /// Number of records contributing to `horizon`.
    pub fn samples(&self, horizon: Horizon) -> usize {
        self.records
            .iter()
            .filter(|record| record.change(horizon).is_some())
            .count()
    }

    /// Mean percent change at `horizon`; `None` if no record has the column.
    pub fn mean(&self, horizon: Horizon) -> Option<f64> {
        stats::mean(&self.column(horizon))
    }

    /// Sample standard deviation of the percent changes at `horizon`.
    pub fn std_dev(&self, horizon: Horizon) -> Result<f64, ReactionError> {
        let column = self.column(horizon);
        stats::sample_std_dev(&column).ok_or(ReactionError::InsufficientHistory {
            horizon,
            samples: column.len(),
        })
    }

    /// One-sigma price range around `anchor` for `horizon`.
    pub fn expected_range(
        &self,
        horizon: Horizon,
        anchor: f64,
    ) -> Result<ExpectedRange, ReactionError> {
        Ok(ExpectedRange::from_sigma(anchor, self.std_dev(horizon)?))
    }
}

/// Builds one record per usable announcement.
///
/// `announcement_dates` may arrive in any order and contain duplicates.
pub fn build<I>(series: &PriceSeries, announcement_dates: I) -> AggregateResult
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut result = AggregateResult::default();

    for date in normalize(announcement_dates) {
        match reaction_at(series, date) {
            Ok(record) => result.records.push(record),
            Err(reason) => {
                debug!(
                    ticker = series.ticker(),
                    %date,
                    %reason,
                    "skipping announcement"
                );
                result.skipped.push(SkippedAnnouncement { date, reason });
            }
        }
    }

    result.records.reverse();
    result
}

fn reaction_at(series: &PriceSeries, date: NaiveDate) -> Result<ReactionRecord, SkipReason> {
    let close_before = series
        .bar_at_offset(date, BEFORE_OFFSET)
        .map_err(SkipReason::Missing)?
        .close;
    let close_after_1d = series
        .bar_at_offset(date, Horizon::OneDay.offset())
        .map_err(SkipReason::Missing)?
        .close;
    if close_before <= 0.0 {
        return Err(SkipReason::NonPositiveClose(close_before));
    }

    let close_after_7d = series
        .bar_at_offset(date, Horizon::SevenDay.offset())
        .ok()
        .map(|bar| bar.close);

    Ok(ReactionRecord {
        announcement_date: date,
        close_before,
        close_after_1d,
        change_1d_pct: percent_change(close_before, close_after_1d),
        close_after_7d,
        change_7d_pct: close_after_7d.map(|after| percent_change(close_before, after)),
    })
}
