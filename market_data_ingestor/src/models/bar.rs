//! Canonical in-memory representation of a daily bar (OHLC).
//!
//! This struct is used as the standard output for all [`DataProvider`](crate::providers::DataProvider)
//! implementations, regardless of the vendor it came from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single trading day's prices for one symbol.
///
/// Keyed by calendar date only; any intraday timestamp a vendor supplies is
/// truncated with [`utc_trading_date`](crate::models::dates::utc_trading_date)
/// before a `DailyBar` is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// The trading date this bar covers.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the session.
    pub high: f64,

    /// Lowest price during the session.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the session. Not all providers supply this.
    pub volume: Option<f64>,
}

impl DailyBar {
    /// Builds a bar without volume, mostly useful for fixtures.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }
}
