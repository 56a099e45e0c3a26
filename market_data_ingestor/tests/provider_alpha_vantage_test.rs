#![cfg(test)]
use market_data_ingestor::{
    models::request_params::EarningsRequestParams,
    providers::{EarningsProvider, alpha_vantage::AlphaVantageProvider},
};
use serial_test::serial;

#[tokio::test]
#[serial]
#[ignore]
async fn test_alpha_vantage_fetch_announcement_dates() {
    // This test requires ALPHAVANTAGE_API_KEY to be set in the environment.
    if std::env::var("ALPHAVANTAGE_API_KEY").is_err() {
        println!("Skipping test_alpha_vantage_fetch_announcement_dates: API key not set.");
        return;
    }

    let provider = AlphaVantageProvider::new().expect("Failed to create AlphaVantageProvider");
    let params = EarningsRequestParams {
        symbol: "IBM".to_string(),
        limit: 8,
    };

    let dates = provider
        .fetch_announcement_dates(params)
        .await
        .expect("fetch_announcement_dates failed");

    assert!(!dates.is_empty());
    assert!(dates.len() <= 8);
    assert!(dates.windows(2).all(|w| w[0] > w[1]), "expected most recent first");
}

#[test]
#[serial]
fn missing_key_is_an_init_error() {
    let saved = std::env::var("ALPHAVANTAGE_API_KEY").ok();
    // SAFETY: serialized with every other env-touching test in this binary.
    unsafe { std::env::remove_var("ALPHAVANTAGE_API_KEY") };

    let err = AlphaVantageProvider::new().err().expect("should fail without a key");
    assert!(err.to_string().contains("ALPHAVANTAGE_API_KEY"));

    if let Some(value) = saved {
        unsafe { std::env::set_var("ALPHAVANTAGE_API_KEY", value) };
    }
}
