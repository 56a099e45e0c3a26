//! Provider abstraction for market data sources.
//!
//! This module defines two traits that serve as unified interfaces over market
//! data vendors:
//!
//! - [`DataProvider`] fetches daily OHLC bars (e.g. Alpaca).
//! - [`EarningsProvider`] fetches historical earnings announcement dates
//!   (e.g. Alpha Vantage).
//!
//! Each concrete vendor implements one or both traits and handles its own API
//! logic and validation. The traits are designed for async usage and support
//! dynamic dispatch (`dyn DataProvider`) for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data_ingestor::models::{
//!     bar_series::BarSeries,
//!     request_params::BarsRequestParams,
//! };
//! use market_data_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_daily_bars(
//!         &self,
//!         params: BarsRequestParams,
//!     ) -> Result<BarSeries, ProviderError> {
//!         Ok(BarSeries::new(params.symbol, vec![]))
//!     }
//! }
//! ```

pub mod alpaca_rest;
pub mod alpha_vantage;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{
    bar_series::BarSeries,
    request_params::{BarsRequestParams, EarningsRequestParams},
};

/// Trait for fetching daily bars from a market data provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the daily bars for one symbol over an inclusive date range.
    ///
    /// # Returns
    ///
    /// * `Ok(BarSeries)` - Bars ascending by date. May be empty if the vendor
    ///   knows nothing about the symbol; callers decide whether that is fatal.
    /// * `Err(ProviderError)` - If the request fails.
    async fn fetch_daily_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError>;
}

/// Trait for fetching historical earnings announcement dates.
#[async_trait]
pub trait EarningsProvider: Send + Sync {
    /// Fetches up to `params.limit` of the most recent announcement dates.
    ///
    /// Dates are already truncated to calendar days. No ordering or uniqueness
    /// is promised; consumers normalize the list themselves.
    async fn fetch_announcement_dates(
        &self,
        params: EarningsRequestParams,
    ) -> Result<Vec<NaiveDate>, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains invalid characters.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a provider implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout, bad body).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned a specific error message (e.g., invalid API key).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the provider.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },

    /// An error during provider configuration or initialization.
    #[snafu(context(false), display("Provider initialization error: {source}"))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}

/// Rejects ranges a vendor would answer with an empty or nonsensical payload.
pub(crate) fn validate_range(params: &BarsRequestParams) -> Result<(), ProviderError> {
    if params.symbol.trim().is_empty() {
        return ValidationSnafu {
            message: "symbol must not be empty",
        }
        .fail();
    }
    if params.start > params.end {
        return ValidationSnafu {
            message: format!("start {} is after end {}", params.start, params.end),
        }
        .fail();
    }
    Ok(())
}
