use chrono::{Days, NaiveDate, NaiveTime, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::models::request_params::{BarsRequestParams, ProviderParams};

/// Largest page Alpaca will return for a bars request.
pub const MAX_PAGE_LIMIT: u32 = 10_000;

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    #[default]
    Raw,
    Split,
    Dividend,
    All,
}

impl Adjustment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Adjustment::Raw => "raw",
            Adjustment::Split => "split",
            Adjustment::Dividend => "dividend",
            Adjustment::All => "all",
        }
    }
}

/// Specifies the source feed for stock data.
///
/// The free Alpaca plan only serves `iex` for recent data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    Sip,
    #[default]
    Iex,
    Otc,
}

impl Feed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::Sip => "sip",
            Feed::Iex => "iex",
            Feed::Otc => "otc",
        }
    }
}

/// Alpaca-specific parameters for a bars request.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AlpacaBarsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<Feed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

fn midnight_utc(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl AlpacaBarsParams {
    /// Fields set on `self` win; unset ones fall back to `defaults`.
    pub fn or(&self, defaults: &AlpacaBarsParams) -> AlpacaBarsParams {
        AlpacaBarsParams {
            adjustment: self.adjustment.or(defaults.adjustment),
            feed: self.feed.or(defaults.feed),
            limit: self.limit.or(defaults.limit),
        }
    }
}

/// Builds the query string for `GET /v2/stocks/bars`.
///
/// Alpaca stamps daily bars at midnight New York time, so the inclusive
/// `end` date is sent as midnight UTC of the following day.
pub fn construct_params(
    params: &BarsRequestParams,
    defaults: &AlpacaBarsParams,
) -> Vec<(String, String)> {
    let alpaca = match &params.provider_specific {
        ProviderParams::Alpaca(p) => p.or(defaults),
        ProviderParams::None => defaults.clone(),
    };
    let end_exclusive = params
        .end
        .checked_add_days(Days::new(1))
        .unwrap_or(params.end);

    vec![
        ("symbols".to_string(), params.symbol.to_uppercase()),
        ("timeframe".to_string(), "1Day".to_string()),
        ("start".to_string(), midnight_utc(params.start)),
        ("end".to_string(), midnight_utc(end_exclusive)),
        (
            "adjustment".to_string(),
            alpaca.adjustment.unwrap_or_default().as_str().to_string(),
        ),
        (
            "feed".to_string(),
            alpaca.feed.unwrap_or_default().as_str().to_string(),
        ),
        (
            "limit".to_string(),
            alpaca
                .limit
                .unwrap_or(MAX_PAGE_LIMIT)
                .min(MAX_PAGE_LIMIT)
                .to_string(),
        ),
        ("sort".to_string(), "asc".to_string()),
    ]
}
