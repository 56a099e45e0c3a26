use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::providers::alpaca_rest::params::AlpacaBarsParams;

/// Universal parameters for requesting daily bars from any market data provider.
///
/// It is intended as the standard input for all
/// [`DataProvider`](crate::providers::DataProvider) implementations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarsRequestParams {
    /// Symbol to request (e.g., `"AAPL"`).
    pub symbol: String,

    /// First calendar date of the requested range (inclusive).
    pub start: NaiveDate,

    /// Last calendar date of the requested range (inclusive).
    ///
    /// Providers whose APIs take an exclusive upper bound must translate this
    /// to the following day themselves.
    pub end: NaiveDate,

    /// Optional, provider-specific parameters.
    #[serde(default)]
    pub provider_specific: ProviderParams,
}

impl BarsRequestParams {
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
            provider_specific: ProviderParams::None,
        }
    }
}

/// An enum to hold provider-specific request parameters.
///
/// This allows callers to specify detailed, per-request options for a
/// particular provider without cluttering the universal `BarsRequestParams`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum ProviderParams {
    #[default]
    None,
    Alpaca(AlpacaBarsParams),
}

/// Parameters for requesting historical earnings announcement dates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EarningsRequestParams {
    /// Symbol to request (e.g., `"AAPL"`).
    pub symbol: String,

    /// Maximum number of most recent reported announcements to return.
    pub limit: usize,
}
