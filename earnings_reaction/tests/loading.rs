mod common;
use common::{day, flat_bar, weekdays};

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use earnings_reaction::{PriceSeries, ReactionError, announcements::fetch_announcements};
use market_data_ingestor::{
    models::{
        bar::DailyBar,
        bar_series::BarSeries,
        request_params::{BarsRequestParams, EarningsRequestParams},
    },
    providers::{ApiSnafu, DataProvider, EarningsProvider, ProviderError},
};

#[derive(Default)]
struct RecordingPrices {
    bars: Vec<DailyBar>,
    fail: bool,
    calls: AtomicUsize,
    last: Mutex<Option<BarsRequestParams>>,
}

#[async_trait]
impl DataProvider for RecordingPrices {
    async fn fetch_daily_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(params.clone());
        if self.fail {
            return ApiSnafu {
                message: "invalid symbol",
            }
            .fail();
        }
        Ok(BarSeries::new(params.symbol, self.bars.clone()))
    }
}

struct FixedEarnings {
    dates: Vec<NaiveDate>,
    last_limit: Mutex<Option<usize>>,
}

#[async_trait]
impl EarningsProvider for FixedEarnings {
    async fn fetch_announcement_dates(
        &self,
        params: EarningsRequestParams,
    ) -> Result<Vec<NaiveDate>, ProviderError> {
        *self.last_limit.lock().unwrap() = Some(params.limit);
        Ok(self.dates.iter().copied().take(params.limit).collect())
    }
}

#[tokio::test]
async fn load_requests_the_52_week_window() {
    let today = day(2024, 6, 3);
    let bars = weekdays(day(2024, 5, 1), 20)
        .into_iter()
        .map(|d| flat_bar(d, 10.0))
        .collect();
    let provider = RecordingPrices {
        bars,
        ..Default::default()
    };

    let series = PriceSeries::load(&provider, " aapl ", 2, today).await.unwrap();

    assert_eq!(series.ticker(), "AAPL");
    assert_eq!(series.len(), 20);
    let params = provider.last.lock().unwrap().clone().unwrap();
    assert_eq!(params.symbol, "AAPL");
    assert_eq!(params.end, today);
    assert_eq!(params.start, today - Duration::weeks(104));
}

#[tokio::test]
async fn invalid_input_never_reaches_the_provider() {
    let provider = RecordingPrices::default();
    let today = day(2024, 6, 3);

    for (ticker, years) in [("", 4), ("   ", 4), ("AAPL", 0), ("AAPL", -1)] {
        let err = PriceSeries::load(&provider, ticker, years, today)
            .await
            .unwrap_err();
        assert!(matches!(err, ReactionError::InvalidInput(_)), "{ticker:?}/{years}");
    }
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_provider_answer_is_data_unavailable() {
    let provider = RecordingPrices::default();
    let err = PriceSeries::load(&provider, "ZZZZ", 1, day(2024, 6, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, ReactionError::DataUnavailable { ref ticker, .. } if ticker == "ZZZZ"));
}

#[tokio::test]
async fn provider_failures_propagate() {
    let provider = RecordingPrices {
        fail: true,
        ..Default::default()
    };
    let err = PriceSeries::load(&provider, "AAPL", 1, day(2024, 6, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, ReactionError::Provider(ProviderError::Api { .. })));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn announcements_are_requested_four_per_year() {
    let provider = FixedEarnings {
        dates: (0..40).map(|q| day(2024, 1, 25) - Duration::weeks(13 * q)).collect(),
        last_limit: Mutex::new(None),
    };

    let dates = fetch_announcements(&provider, "ibm", 3).await.unwrap();
    assert_eq!(*provider.last_limit.lock().unwrap(), Some(12));
    assert_eq!(dates.len(), 12);

    assert!(matches!(
        fetch_announcements(&provider, "", 3).await,
        Err(ReactionError::InvalidInput(_))
    ));
}
