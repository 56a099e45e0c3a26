//! A collection of daily bars for a specific symbol.

use crate::models::bar::DailyBar;

/// Represents a complete set of daily data for a single symbol.
///
/// This struct groups a vector of [`DailyBar`]s with their corresponding symbol,
/// making the data set self-describing. Providers return bars ascending by date;
/// consumers that need the guarantee should still sort.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// The collection of OHLC bars.
    pub bars: Vec<DailyBar>,
}

impl BarSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<DailyBar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
