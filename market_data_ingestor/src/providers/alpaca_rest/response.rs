use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::models::{bar::DailyBar, dates::utc_trading_date};

#[derive(Deserialize, Debug)]
pub struct AlpacaBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: Option<f64>,
}

impl From<AlpacaBar> for DailyBar {
    fn from(ab: AlpacaBar) -> Self {
        DailyBar {
            date: utc_trading_date(&ab.timestamp),
            open: ab.open,
            high: ab.high,
            low: ab.low,
            close: ab.close,
            volume: ab.volume,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct AlpacaResponse {
    // Alpaca sends `null` rather than `{}` when no symbol matched.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bars: IndexMap<String, Vec<AlpacaBar>>,
    pub next_page_token: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<IndexMap<String, Vec<AlpacaBar>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_page_and_truncates_timestamps() {
        let body = r#"{
            "bars": {
                "AAPL": [
                    {"t":"2024-01-02T05:00:00Z","o":187.15,"h":188.44,"l":183.89,"c":185.64,"v":82488674,"n":1009074,"vw":185.9},
                    {"t":"2024-01-03T05:00:00Z","o":184.22,"h":185.88,"l":183.43,"c":184.25,"v":58414460,"n":656956,"vw":184.6}
                ]
            },
            "next_page_token": "QUFQTHxEfDIwMjQtMDEtMDM="
        }"#;
        let resp: AlpacaResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.next_page_token.as_deref(), Some("QUFQTHxEfDIwMjQtMDEtMDM="));

        let bars: Vec<DailyBar> = resp
            .bars
            .into_iter()
            .flat_map(|(_, bars)| bars)
            .map(DailyBar::from)
            .collect();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[1].close, 184.25);
    }

    #[test]
    fn null_bars_is_an_empty_page() {
        let resp: AlpacaResponse =
            serde_json::from_str(r#"{"bars":null,"next_page_token":null}"#).unwrap();
        assert!(resp.bars.is_empty());
        assert!(resp.next_page_token.is_none());
    }
}
