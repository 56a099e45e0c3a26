use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    models::dates::parse_provider_date,
    providers::{ApiSnafu, ProviderError},
};

/// One row of the `quarterlyEarnings` array returned by `function=EARNINGS`.
///
/// Every value arrives as a string; unreported fields are the literal `"None"`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyEarning {
    pub fiscal_date_ending: Option<String>,
    pub reported_date: Option<String>,
    #[serde(rename = "reportedEPS")]
    pub reported_eps: Option<String>,
    pub report_time: Option<String>,
}

impl QuarterlyEarning {
    /// The announcement date, if the quarter has actually been reported.
    pub fn reported_on(&self) -> Option<NaiveDate> {
        let eps = self.reported_eps.as_deref()?;
        eps.trim().parse::<f64>().ok()?;
        parse_provider_date(self.reported_date.as_deref()?)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct EarningsResponse {
    #[serde(rename = "quarterlyEarnings", default)]
    pub quarterly_earnings: Vec<QuarterlyEarning>,
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

impl EarningsResponse {
    /// Returns up to `limit` reported announcement dates, most recent first.
    ///
    /// Alpha Vantage answers bad symbols and exhausted quotas with HTTP 200 and
    /// a message body, so those are surfaced here as [`ProviderError::Api`].
    pub fn into_reported_dates(self, limit: usize) -> Result<Vec<NaiveDate>, ProviderError> {
        if let Some(message) = self.error_message.or(self.note).or(self.information) {
            return ApiSnafu { message }.fail();
        }

        let mut dates: Vec<NaiveDate> = self
            .quarterly_earnings
            .iter()
            .filter_map(QuarterlyEarning::reported_on)
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.truncate(limit);
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const BODY: &str = r#"{
        "symbol": "IBM",
        "annualEarnings": [{"fiscalDateEnding": "2023-12-31", "reportedEPS": "9.61"}],
        "quarterlyEarnings": [
            {"fiscalDateEnding": "2024-03-31", "reportedDate": "2024-04-24", "reportedEPS": "None",
             "estimatedEPS": "1.6", "surprise": "None", "surprisePercentage": "None", "reportTime": "post-market"},
            {"fiscalDateEnding": "2023-12-31", "reportedDate": "2024-01-24", "reportedEPS": "3.87",
             "estimatedEPS": "3.78", "surprise": "0.09", "surprisePercentage": "2.381", "reportTime": "post-market"},
            {"fiscalDateEnding": "2023-09-30", "reportedDate": "2023-10-25", "reportedEPS": "2.2",
             "estimatedEPS": "2.13", "surprise": "0.07", "surprisePercentage": "3.2864", "reportTime": "post-market"},
            {"fiscalDateEnding": "2023-06-30", "reportedDate": "2023-07-19", "reportedEPS": "2.18",
             "estimatedEPS": "2.01", "surprise": "0.17", "surprisePercentage": "8.4577", "reportTime": "post-market"}
        ]
    }"#;

    #[test]
    fn drops_unreported_quarters_and_honours_limit() {
        let resp: EarningsResponse = serde_json::from_str(BODY).unwrap();
        let dates = resp.into_reported_dates(2).unwrap();
        assert_eq!(dates, vec![day(2024, 1, 24), day(2023, 10, 25)]);
    }

    #[test]
    fn limit_larger_than_feed_returns_everything_reported() {
        let resp: EarningsResponse = serde_json::from_str(BODY).unwrap();
        let dates = resp.into_reported_dates(40).unwrap();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates.last(), Some(&day(2023, 7, 19)));
    }

    #[test]
    fn error_payloads_become_api_errors() {
        let resp: EarningsResponse = serde_json::from_str(
            r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#,
        )
        .unwrap();
        assert!(matches!(
            resp.into_reported_dates(4),
            Err(ProviderError::Api { .. })
        ));

        let throttled: EarningsResponse =
            serde_json::from_str(r#"{"Information": "rate limit reached"}"#).unwrap();
        let err = throttled.into_reported_dates(4).unwrap_err();
        assert!(err.to_string().contains("rate limit reached"));
    }

    #[test]
    fn unknown_symbol_yields_empty_list() {
        let resp: EarningsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.into_reported_dates(4).unwrap().is_empty());
    }
}
