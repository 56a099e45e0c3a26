use std::num::NonZeroU32;

use async_trait::async_trait;
use chrono::NaiveDate;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::info;

use crate::{
    models::request_params::EarningsRequestParams,
    providers::{
        ApiSnafu, ClientBuildSnafu, EarningsProvider, MissingEnvVarSnafu, ProviderError,
        ProviderInitError, ReqwestSnafu, ValidationSnafu,
        alpha_vantage::response::EarningsResponse,
    },
};

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Free-tier allowance.
const DEFAULT_REQUESTS_PER_MINUTE: NonZeroU32 = nonzero!(5u32);

pub struct AlphaVantageProvider {
    client: Client,
    limiter: DefaultDirectRateLimiter,
    api_key: SecretString,
}

impl AlphaVantageProvider {
    /// Creates a new Alpha Vantage provider.
    ///
    /// Reads the API key from the `ALPHAVANTAGE_API_KEY` environment variable.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_rate_limit(DEFAULT_REQUESTS_PER_MINUTE.get())
    }

    pub fn with_rate_limit(requests_per_minute: u32) -> Result<Self, ProviderInitError> {
        let api_key = SecretString::new(
            get_env_var("ALPHAVANTAGE_API_KEY")
                .context(MissingEnvVarSnafu)?
                .into(),
        );
        let client = Client::builder().build().context(ClientBuildSnafu)?;
        let per_minute =
            NonZeroU32::new(requests_per_minute).unwrap_or(DEFAULT_REQUESTS_PER_MINUTE);

        Ok(Self {
            client,
            limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
            api_key,
        })
    }
}

#[async_trait]
impl EarningsProvider for AlphaVantageProvider {
    async fn fetch_announcement_dates(
        &self,
        params: EarningsRequestParams,
    ) -> Result<Vec<NaiveDate>, ProviderError> {
        if params.symbol.trim().is_empty() {
            return ValidationSnafu {
                message: "symbol must not be empty",
            }
            .fail();
        }

        self.limiter.until_ready().await;
        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "EARNINGS"),
                ("symbol", params.symbol.as_str()),
                ("apikey", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .context(ReqwestSnafu)?;

        if !response.status().is_success() {
            return ApiSnafu {
                message: format!("HTTP {}", response.status()),
            }
            .fail();
        }

        let body = response
            .json::<EarningsResponse>()
            .await
            .context(ReqwestSnafu)?;
        let dates = body.into_reported_dates(params.limit)?;

        info!(
            symbol = %params.symbol,
            limit = params.limit,
            dates = dates.len(),
            "fetched earnings dates from alpha vantage"
        );
        Ok(dates)
    }
}
