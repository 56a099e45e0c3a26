//! Announcement date normalization and fetching.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use market_data_ingestor::{
    models::request_params::EarningsRequestParams, providers::EarningsProvider,
};
use tracing::info;

use crate::errors::{ReactionError, normalize_ticker, validate_lookback};

/// Earnings are reported quarterly; the provider is asked for this many per year.
pub const QUARTERS_PER_YEAR: usize = 4;

/// Deduplicates and sorts announcement dates oldest first.
///
/// Providers disagree on ordering (most report newest first), so the
/// aggregator never trusts the input order.
pub fn normalize<I>(dates: I) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = NaiveDate>,
{
    dates
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// How many announcements to request for a lookback in years.
pub fn announcement_limit(lookback_years: i64) -> Result<usize, ReactionError> {
    validate_lookback(lookback_years)?;
    usize::try_from(lookback_years)
        .ok()
        .and_then(|years| years.checked_mul(QUARTERS_PER_YEAR))
        .ok_or_else(|| {
            ReactionError::InvalidInput(format!("lookback of {lookback_years} years is too large"))
        })
}

/// Fetches the announcement dates covering the lookback window.
///
/// The result is returned as the provider gave it; [`normalize`] is applied
/// by the aggregator.
pub async fn fetch_announcements(
    provider: &dyn EarningsProvider,
    ticker: &str,
    lookback_years: i64,
) -> Result<Vec<NaiveDate>, ReactionError> {
    let symbol = normalize_ticker(ticker)?;
    let limit = announcement_limit(lookback_years)?;

    let dates = provider
        .fetch_announcement_dates(EarningsRequestParams {
            symbol: symbol.clone(),
            limit,
        })
        .await?;

    info!(ticker = %symbol, limit, dates = dates.len(), "loaded announcement dates");
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn normalize_sorts_oldest_first_and_dedupes() {
        let got = normalize(vec![
            day(2024, 4, 25),
            day(2023, 10, 26),
            day(2024, 4, 25),
            day(2024, 1, 25),
        ]);
        assert_eq!(got, vec![day(2023, 10, 26), day(2024, 1, 25), day(2024, 4, 25)]);
    }

    #[test]
    fn limit_is_four_per_year() {
        assert_eq!(announcement_limit(4).unwrap(), 16);
        assert!(matches!(
            announcement_limit(0),
            Err(ReactionError::InvalidInput(_))
        ));
    }

    proptest! {
        #[test]
        fn normalize_is_strictly_increasing_and_complete(offsets in prop::collection::vec(0i64..2_000, 0..64)) {
            let base = day(2015, 1, 1);
            let dates: Vec<NaiveDate> = offsets
                .iter()
                .map(|d| base + chrono::Duration::days(*d))
                .collect();

            let got = normalize(dates.clone());

            prop_assert!(got.windows(2).all(|w| w[0] < w[1]));
            for date in &dates {
                prop_assert!(got.binary_search(date).is_ok());
            }
        }
    }
}
