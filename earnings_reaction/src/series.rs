//! Calendar-aligned daily price series.
//!
//! Bars are addressed by trading-day *position*, never by calendar arithmetic:
//! "one day before" an announcement is the previous bar in the series, however
//! many weekend or holiday days lie between them.

use chrono::{Duration, NaiveDate};
use market_data_ingestor::{
    models::{bar::DailyBar, request_params::BarsRequestParams},
    providers::DataProvider,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::{ReactionError, normalize_ticker, validate_lookback};

/// A lookback "year" is 52 weeks, not a calendar year.
pub const WEEKS_PER_YEAR: i64 = 52;

/// Why an offset lookup produced no bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unavailable {
    /// No bar carries the base date (weekend, holiday, or outside the window).
    #[error("no bar dated {0}")]
    DateNotFound(NaiveDate),

    /// The base date exists but `position + offset` falls outside the series.
    #[error("offset {offset:+} from position {position} is outside 0..{len}")]
    OutOfBounds {
        /// Position of the base date.
        position: usize,
        /// Requested offset.
        offset: isize,
        /// Series length.
        len: usize,
    },
}

/// Returns the inclusive `[start, today]` window for a lookback in years.
pub fn lookback_window(
    today: NaiveDate,
    lookback_years: i64,
) -> Result<(NaiveDate, NaiveDate), ReactionError> {
    validate_lookback(lookback_years)?;
    let span = lookback_years
        .checked_mul(WEEKS_PER_YEAR)
        .and_then(Duration::try_weeks)
        .ok_or_else(|| {
            ReactionError::InvalidInput(format!("lookback of {lookback_years} years is too large"))
        })?;
    let start = today.checked_sub_signed(span).ok_or_else(|| {
        ReactionError::InvalidInput(format!("lookback of {lookback_years} years is too large"))
    })?;
    Ok((start, today))
}

/// Daily bars for one ticker, ascending by date with at most one bar per date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<DailyBar>,
}

impl PriceSeries {
    /// Fetches `[today - lookback_years * 52 weeks, today]` from `provider`.
    ///
    /// Input is validated before the provider is touched. An empty answer is
    /// [`ReactionError::DataUnavailable`]; provider failures propagate as-is.
    pub async fn load(
        provider: &dyn DataProvider,
        ticker: &str,
        lookback_years: i64,
        today: NaiveDate,
    ) -> Result<Self, ReactionError> {
        let ticker = normalize_ticker(ticker)?;
        let (start, end) = lookback_window(today, lookback_years)?;

        let fetched = provider
            .fetch_daily_bars(BarsRequestParams::new(ticker.clone(), start, end))
            .await?;

        if fetched.is_empty() {
            return Err(ReactionError::DataUnavailable {
                ticker,
                reason: format!("provider returned no bars between {start} and {end}"),
            });
        }

        let series = Self::from_bars(ticker, fetched.bars);
        info!(
            ticker = %series.ticker,
            bars = series.len(),
            %start,
            %end,
            "loaded price series"
        );
        Ok(series)
    }

    /// Builds a series from provider bars in any order.
    ///
    /// Bars are sorted by date; when a date repeats, the first bar supplied
    /// for it wins.
    pub fn from_bars(ticker: impl Into<String>, mut bars: Vec<DailyBar>) -> Self {
        let ticker = ticker.into();
        // Stable, so the first bar per date stays first.
        bars.sort_by_key(|bar| bar.date);
        let before = bars.len();
        bars.dedup_by_key(|bar| bar.date);
        if bars.len() != before {
            warn!(
                %ticker,
                dropped = before - bars.len(),
                "dropped bars with duplicate dates"
            );
        }
        Self { ticker, bars }
    }

    /// The (normalized) ticker this series belongs to.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// All bars, oldest first.
    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// `true` if the series holds no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Position of the bar dated exactly `date`.
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.bars.binary_search_by_key(&date, |bar| bar.date).ok()
    }

    /// The bar `offset` trading days away from the bar dated `date`.
    pub fn bar_at_offset(&self, date: NaiveDate, offset: isize) -> Result<&DailyBar, Unavailable> {
        let position = self
            .position_of(date)
            .ok_or(Unavailable::DateNotFound(date))?;
        let out_of_bounds = Unavailable::OutOfBounds {
            position,
            offset,
            len: self.bars.len(),
        };
        let target = position
            .checked_add_signed(offset)
            .ok_or(out_of_bounds)?;
        self.bars.get(target).ok_or(out_of_bounds)
    }

    /// Most recent bar, if any.
    pub fn latest_bar(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    /// Close of the most recent bar; the anchor for expected-move ranges.
    pub fn latest_close(&self) -> Result<f64, ReactionError> {
        self.latest_bar()
            .map(|bar| bar.close)
            .ok_or_else(|| ReactionError::DataUnavailable {
                ticker: self.ticker.clone(),
                reason: "price series is empty".to_string(),
            })
    }

    /// The most recent `n` bars (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[DailyBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }
}
