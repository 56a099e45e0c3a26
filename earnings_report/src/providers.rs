//! Builds the concrete providers from configuration.
use std::sync::Arc;

use market_data_ingestor::providers::{
    DataProvider, EarningsProvider, ProviderInitError, alpaca_rest::AlpacaProvider,
    alpha_vantage::AlphaVantageProvider,
};

use crate::config::{AlpacaSettings, AlphaVantageSettings};

/// Alpaca daily bars, with the configured feed, adjustment and request budget.
pub fn build_price_provider(
    settings: &AlpacaSettings,
) -> Result<Arc<dyn DataProvider>, ProviderInitError> {
    let provider = AlpacaProvider::with_rate_limit(settings.requests_per_minute)?
        .with_defaults(settings.request_defaults());
    Ok(Arc::new(provider))
}

/// Alpha Vantage earnings calendar with the configured request budget.
pub fn build_earnings_provider(
    settings: &AlphaVantageSettings,
) -> Result<Arc<dyn EarningsProvider>, ProviderInitError> {
    let provider = AlphaVantageProvider::with_rate_limit(settings.requests_per_minute)?;
    Ok(Arc::new(provider))
}
