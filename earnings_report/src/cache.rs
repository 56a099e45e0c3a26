//! Read-mostly cache of fetched market data, keyed by (ticker, lookback).
//!
//! Readers load an `Arc<HashMap<..>>` snapshot with no lock contention;
//! writers swap in a new map through [`ArcSwap::rcu`], dropping expired
//! entries on the way. A cached snapshot is served until `ttl` has elapsed
//! since it was stored, so repeated requests in one interactive session hit
//! the providers once.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use arc_swap::ArcSwap;
use chrono::NaiveDate;
use earnings_reaction::PriceSeries;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    ticker: String,
    lookback_years: i64,
}

impl CacheKey {
    pub fn new(ticker: &str, lookback_years: i64) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            lookback_years,
        }
    }
}

/// Raw inputs of one report: the price series and the announcement dates.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub series: PriceSeries,
    pub announcements: Vec<NaiveDate>,
    /// Calendar date the lookback window was computed from.
    pub fetched_on: NaiveDate,
}

#[derive(Debug, Clone)]
struct Entry {
    snapshot: Arc<MarketSnapshot>,
    stored_at: Instant,
}

type Entries = HashMap<CacheKey, Entry>;

pub struct SnapshotCache {
    ttl: Duration,
    entries: ArcSwap<Entries>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: ArcSwap::from_pointee(Entries::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<MarketSnapshot>> {
        self.get_at(key, Instant::now())
    }

    /// Lookup as of `now`; expired entries are treated as absent.
    pub fn get_at(&self, key: &CacheKey, now: Instant) -> Option<Arc<MarketSnapshot>> {
        let entries = self.entries.load();
        entries
            .get(key)
            .filter(|entry| !self.expired(entry, now))
            .map(|entry| Arc::clone(&entry.snapshot))
    }

    pub fn insert(&self, key: CacheKey, snapshot: MarketSnapshot) -> Arc<MarketSnapshot> {
        self.insert_at(key, snapshot, Instant::now())
    }

    pub fn insert_at(
        &self,
        key: CacheKey,
        snapshot: MarketSnapshot,
        now: Instant,
    ) -> Arc<MarketSnapshot> {
        let snapshot = Arc::new(snapshot);
        let entry = Entry {
            snapshot: Arc::clone(&snapshot),
            stored_at: now,
        };
        self.entries.rcu(|current| {
            let mut next: Entries = current
                .iter()
                .filter(|(_, existing)| !self.expired(existing, now))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            next.insert(key.clone(), entry.clone());
            next
        });
        snapshot
    }

    /// Entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.store(Arc::new(Entries::new()));
    }

    fn expired(&self, entry: &Entry, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_data_ingestor::models::bar::DailyBar;

    fn snapshot(ticker: &str) -> MarketSnapshot {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        MarketSnapshot {
            series: PriceSeries::from_bars(
                ticker,
                vec![DailyBar::new(day, 1.0, 1.0, 1.0, 1.0)],
            ),
            announcements: vec![day],
            fetched_on: day,
        }
    }

    #[test]
    fn hit_within_ttl_miss_after() {
        let cache = SnapshotCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        let key = CacheKey::new("AAPL", 4);

        cache.insert_at(key.clone(), snapshot("AAPL"), t0);

        assert!(cache.get_at(&key, t0 + Duration::from_secs(59)).is_some());
        assert!(cache.get_at(&key, t0 + Duration::from_secs(60)).is_none());
    }

    #[test]
    fn keys_ignore_case_and_whitespace_but_not_lookback() {
        let cache = SnapshotCache::new(Duration::from_secs(60));
        cache.insert(CacheKey::new("msft", 2), snapshot("MSFT"));

        assert!(cache.get(&CacheKey::new(" MSFT ", 2)).is_some());
        assert!(cache.get(&CacheKey::new("MSFT", 3)).is_none());
    }

    #[test]
    fn inserts_prune_expired_entries() {
        let cache = SnapshotCache::new(Duration::from_secs(10));
        let t0 = Instant::now();

        cache.insert_at(CacheKey::new("A", 1), snapshot("A"), t0);
        cache.insert_at(CacheKey::new("B", 1), snapshot("B"), t0 + Duration::from_secs(5));
        assert_eq!(cache.len(), 2);

        cache.insert_at(CacheKey::new("C", 1), snapshot("C"), t0 + Duration::from_secs(12));
        assert_eq!(cache.len(), 2);
        assert!(cache.get_at(&CacheKey::new("A", 1), t0 + Duration::from_secs(12)).is_none());

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_ttl_never_hits() {
        let cache = SnapshotCache::new(Duration::ZERO);
        let key = CacheKey::new("AAPL", 4);
        cache.insert(key.clone(), snapshot("AAPL"));
        assert!(cache.get(&key).is_none());
    }
}
