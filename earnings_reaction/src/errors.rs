//! Error type for the reaction computation.

use market_data_ingestor::providers::ProviderError;
use thiserror::Error;

use crate::aggregate::Horizon;

/// Everything that can stop or degrade a report.
#[derive(Debug, Error)]
pub enum ReactionError {
    /// Rejected before any provider call (empty ticker, non-positive lookback).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The provider answered but there is nothing to compute on.
    #[error("no usable market data for {ticker}: {reason}")]
    DataUnavailable {
        /// Ticker the data was requested for.
        ticker: String,
        /// Human readable cause.
        reason: String,
    },

    /// A provider call failed. Never retried.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Fewer than two values in a change column; the statistic is undefined.
    #[error("insufficient history for {horizon} statistics: {samples} sample(s), need at least 2")]
    InsufficientHistory {
        /// Column that came up short.
        horizon: Horizon,
        /// Values that were available.
        samples: usize,
    },
}

/// Trims and upper-cases a ticker, rejecting blanks.
pub fn normalize_ticker(ticker: &str) -> Result<String, ReactionError> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(ReactionError::InvalidInput(
            "ticker must not be empty".to_string(),
        ));
    }
    Ok(ticker.to_uppercase())
}

/// Rejects zero or negative lookback windows.
pub fn validate_lookback(lookback_years: i64) -> Result<(), ReactionError> {
    if lookback_years <= 0 {
        return Err(ReactionError::InvalidInput(format!(
            "lookback must be a positive number of years, got {lookback_years}"
        )));
    }
    Ok(())
}
