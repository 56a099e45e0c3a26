//! Report service: cache lookup, provider fetches, then the core computation.

use std::sync::Arc;

use chrono::NaiveDate;
use earnings_reaction::{
    ReactionError, ReactionReport, PriceSeries,
    announcements::fetch_announcements,
    errors::{normalize_ticker, validate_lookback},
};
use market_data_ingestor::providers::{DataProvider, EarningsProvider};
use tracing::{debug, info};

use crate::cache::{CacheKey, MarketSnapshot, SnapshotCache};

/// A computed report plus the raw data it was computed from.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub snapshot: Arc<MarketSnapshot>,
    pub reaction: ReactionReport,
}

pub struct ReportService {
    prices: Arc<dyn DataProvider>,
    earnings: Arc<dyn EarningsProvider>,
    cache: SnapshotCache,
}

impl ReportService {
    pub fn new(
        prices: Arc<dyn DataProvider>,
        earnings: Arc<dyn EarningsProvider>,
        cache: SnapshotCache,
    ) -> Self {
        Self {
            prices,
            earnings,
            cache,
        }
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Price series and announcement dates for `ticker`, from cache if fresh.
    ///
    /// Input is validated before the cache or any provider is consulted.
    /// Provider errors abort the call and nothing is cached.
    pub async fn snapshot(
        &self,
        ticker: &str,
        lookback_years: i64,
        today: NaiveDate,
    ) -> Result<Arc<MarketSnapshot>, ReactionError> {
        let ticker = normalize_ticker(ticker)?;
        validate_lookback(lookback_years)?;

        let key = CacheKey::new(&ticker, lookback_years);
        if let Some(hit) = self.cache.get(&key) {
            debug!(%ticker, lookback_years, "serving market data from cache");
            return Ok(hit);
        }

        let series = PriceSeries::load(self.prices.as_ref(), &ticker, lookback_years, today).await?;
        let announcements =
            fetch_announcements(self.earnings.as_ref(), &ticker, lookback_years).await?;

        info!(
            %ticker,
            lookback_years,
            bars = series.len(),
            announcements = announcements.len(),
            "caching market data"
        );
        Ok(self.cache.insert(
            key,
            MarketSnapshot {
                series,
                announcements,
                fetched_on: today,
            },
        ))
    }

    pub async fn report(
        &self,
        ticker: &str,
        lookback_years: i64,
        today: NaiveDate,
    ) -> Result<GeneratedReport, ReactionError> {
        let snapshot = self.snapshot(ticker, lookback_years, today).await?;
        let reaction = ReactionReport::compute(
            &snapshot.series,
            snapshot.announcements.iter().copied(),
        )?;
        Ok(GeneratedReport { snapshot, reaction })
    }
}
