//! The consumer-facing bundle read by the presentation layer.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::{
    aggregate::{self, AggregateResult, ExpectedRange, Horizon, ReactionRecord},
    errors::ReactionError,
    series::PriceSeries,
};

/// Statistics for one change column.
///
/// `std_dev` and `range` are `None` when fewer than two records carry the
/// column; `mean` is `None` only when none do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonSummary {
    /// Which column this summarizes.
    pub horizon: Horizon,
    /// Records that contributed.
    pub samples: usize,
    /// Mean percent change.
    pub mean: Option<f64>,
    /// Sample standard deviation of the percent changes.
    pub std_dev: Option<f64>,
    /// One-sigma range around the latest close.
    pub range: Option<ExpectedRange>,
}

impl HorizonSummary {
    fn from_result(result: &AggregateResult, horizon: Horizon, anchor: f64) -> Self {
        let range = result
            .expected_range(horizon, anchor)
            .inspect_err(|err| debug!(%horizon, %err, "statistics unavailable"))
            .ok();
        Self {
            horizon,
            samples: result.samples(horizon),
            mean: result.mean(horizon),
            std_dev: range.map(|r| r.sigma_pct),
            range,
        }
    }
}

/// Everything a report renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionReport {
    /// Normalized ticker.
    pub ticker: String,
    /// Date of the latest bar.
    pub as_of: NaiveDate,
    /// Latest close; the anchor of both ranges.
    pub latest_close: f64,
    /// Records, newest announcement first.
    pub records: Vec<ReactionRecord>,
    /// Announcements that yielded no record.
    pub skipped: usize,
    /// `+1D` statistics.
    pub one_day: HorizonSummary,
    /// `+7D` statistics.
    pub seven_day: HorizonSummary,
}

impl ReactionReport {
    /// Runs the aggregator and collects the summary.
    ///
    /// Fails only if the series is empty; thin history degrades to `None`
    /// statistics instead.
    pub fn compute<I>(series: &PriceSeries, announcement_dates: I) -> Result<Self, ReactionError>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let latest = series
            .latest_bar()
            .ok_or_else(|| ReactionError::DataUnavailable {
                ticker: series.ticker().to_string(),
                reason: "price series is empty".to_string(),
            })?;
        let anchor = latest.close;
        let result = aggregate::build(series, announcement_dates);

        Ok(Self {
            ticker: series.ticker().to_string(),
            as_of: latest.date,
            latest_close: anchor,
            skipped: result.skipped().len(),
            one_day: HorizonSummary::from_result(&result, Horizon::OneDay, anchor),
            seven_day: HorizonSummary::from_result(&result, Horizon::SevenDay, anchor),
            records: result.records().to_vec(),
        })
    }

    /// Summary for `horizon`.
    pub fn summary(&self, horizon: Horizon) -> &HorizonSummary {
        match horizon {
            Horizon::OneDay => &self.one_day,
            Horizon::SevenDay => &self.seven_day,
        }
    }

    /// The newest `rows` records.
    pub fn recent(&self, rows: usize) -> &[ReactionRecord] {
        &self.records[..rows.min(self.records.len())]
    }
}
