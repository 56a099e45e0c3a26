use std::num::NonZeroU32;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::{debug, info};

use crate::{
    models::{bar::DailyBar, bar_series::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, InvalidApiKeySnafu, MissingEnvVarSnafu,
        ProviderError, ProviderInitError, ReqwestSnafu,
        alpaca_rest::{
            params::{AlpacaBarsParams, construct_params},
            response::{AlpacaBar, AlpacaResponse},
        },
        validate_range,
    },
};

const BASE_URL: &str = "https://data.alpaca.markets/v2/stocks/bars";

/// Alpaca's documented ceiling for the free data plan.
const DEFAULT_REQUESTS_PER_MINUTE: NonZeroU32 = nonzero!(200u32);

pub struct AlpacaProvider {
    client: Client,
    limiter: DefaultDirectRateLimiter,
    defaults: AlpacaBarsParams,
    _api_key: SecretString,
    _secret_key: SecretString,
}

impl AlpacaProvider {
    /// Creates a new Alpaca provider.
    ///
    /// Reads API keys from the `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`
    /// environment variables.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_rate_limit(DEFAULT_REQUESTS_PER_MINUTE.get())
    }

    /// Same as [`AlpacaProvider::new`] with a custom page-request budget.
    /// A zero budget falls back to the default.
    pub fn with_rate_limit(requests_per_minute: u32) -> Result<Self, ProviderInitError> {
        let api_key = SecretString::new(
            get_env_var("APCA_API_KEY_ID")
                .context(MissingEnvVarSnafu)?
                .into(),
        );
        let secret_key = SecretString::new(
            get_env_var("APCA_API_SECRET_KEY")
                .context(MissingEnvVarSnafu)?
                .into(),
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(api_key.expose_secret()).context(InvalidApiKeySnafu)?,
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            header::HeaderValue::from_str(secret_key.expose_secret())
                .context(InvalidApiKeySnafu)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        let per_minute =
            NonZeroU32::new(requests_per_minute).unwrap_or(DEFAULT_REQUESTS_PER_MINUTE);

        Ok(Self {
            client,
            limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
            defaults: AlpacaBarsParams::default(),
            _api_key: api_key,
            _secret_key: secret_key,
        })
    }

    /// Request options used when a request carries no Alpaca-specific params.
    pub fn with_defaults(mut self, defaults: AlpacaBarsParams) -> Self {
        self.defaults = defaults;
        self
    }
}

#[async_trait]
impl DataProvider for AlpacaProvider {
    async fn fetch_daily_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError> {
        validate_range(&params)?;

        let mut collected: Vec<AlpacaBar> = Vec::new();
        let mut next_page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut query_params = construct_params(&params, &self.defaults);
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            self.limiter.until_ready().await;
            let response = self
                .client
                .get(BASE_URL)
                .query(&query_params)
                .send()
                .await
                .context(ReqwestSnafu)?;

            if !response.status().is_success() {
                let status = response.status();
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return ApiSnafu {
                    message: format!("{status}: {error_msg}"),
                }
                .fail();
            }

            let alpaca_response = response
                .json::<AlpacaResponse>()
                .await
                .context(ReqwestSnafu)?;
            pages += 1;

            // Single-symbol requests, but Alpaca still keys the page by symbol.
            for (_symbol, bars) in alpaca_response.bars {
                collected.extend(bars);
            }

            match alpaca_response.next_page_token {
                Some(token) => {
                    debug!(symbol = %params.symbol, pages, "following alpaca page token");
                    next_page_token = Some(token);
                }
                None => break,
            }
        }

        let bars: Vec<DailyBar> = collected.into_iter().map(DailyBar::from).collect();
        info!(
            symbol = %params.symbol,
            start = %params.start,
            end = %params.end,
            bars = bars.len(),
            pages,
            "fetched daily bars from alpaca"
        );

        Ok(BarSeries::new(params.symbol.to_uppercase(), bars))
    }
}
