//! Report configuration (`earnings_report.toml`).
//!
//! Every section and field is optional; omitted values take the defaults
//! below. API keys never live here, they are read from the environment by the
//! providers themselves.
//!
//! ```toml
//! [report]
//! default_years = 4
//! table_rows = 5
//! chart_bars = 50
//! include_7d = true
//!
//! [cache]
//! ttl_hours = 12
//!
//! [alpaca]
//! feed = "iex"
//! adjustment = "raw"
//! requests_per_minute = 200
//!
//! [alpha_vantage]
//! requests_per_minute = 5
//! ```

use std::{path::Path, time::Duration};

use market_data_ingestor::providers::alpaca_rest::{Adjustment, AlpacaBarsParams, Feed};
use serde::Deserialize;
use shared_utils::config::{ConfigError, load_toml, load_toml_or_default};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "earnings_report.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub report: ReportSettings,
    pub cache: CacheSettings,
    pub alpaca: AlpacaSettings,
    pub alpha_vantage: AlphaVantageSettings,
}

impl AppConfig {
    /// Loads `path` if given (it must exist), else the default path if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => load_toml(path),
            None => load_toml_or_default(DEFAULT_CONFIG_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSettings {
    /// Lookback used when the request does not name one.
    pub default_years: i64,
    /// Rows in the recent-announcements table.
    pub table_rows: usize,
    /// Sessions shown in the candlestick chart.
    pub chart_bars: usize,
    /// Whether the +7D block and column are shown.
    pub include_7d: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_years: 4,
            table_rows: 5,
            chart_bars: 50,
            include_7d: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheSettings {
    pub ttl_hours: u64,
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(3600))
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_hours: 12 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlpacaSettings {
    pub feed: Feed,
    pub adjustment: Adjustment,
    pub requests_per_minute: u32,
}

impl AlpacaSettings {
    pub fn request_defaults(&self) -> AlpacaBarsParams {
        AlpacaBarsParams {
            adjustment: Some(self.adjustment),
            feed: Some(self.feed),
            limit: None,
        }
    }
}

impl Default for AlpacaSettings {
    fn default() -> Self {
        Self {
            feed: Feed::Iex,
            adjustment: Adjustment::Raw,
            requests_per_minute: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlphaVantageSettings {
    pub requests_per_minute: u32,
}

impl Default for AlphaVantageSettings {
    fn default() -> Self {
        Self {
            requests_per_minute: 5,
        }
    }
}
