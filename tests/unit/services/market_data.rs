//! Unit tests for the in-memory market data provider

use chrono::{Duration, NaiveDate};
use stockdash::models::price::PriceBar;
use stockdash::services::market_data::{FetchError, InMemoryMarketDataProvider, MarketDataProvider};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bars(count: i64) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let close = 10.0 + i as f64;
            PriceBar::new(date(2024, 1, 1) + Duration::days(i), close, close, close, close, 5)
        })
        .collect()
}

#[tokio::test]
async fn test_range_is_start_inclusive_end_exclusive() {
    let provider = InMemoryMarketDataProvider::new().with_series("MSFT", bars(10));
    let series = provider
        .fetch_history("MSFT", date(2024, 1, 3), date(2024, 1, 6))
        .await
        .unwrap();

    assert_eq!(series.dates(), vec![date(2024, 1, 3), date(2024, 1, 4), date(2024, 1, 5)]);
}

#[tokio::test]
async fn test_symbol_lookup_is_case_insensitive() {
    let provider = InMemoryMarketDataProvider::new().with_series("msft", bars(3));
    let series = provider
        .fetch_history("Msft", date(2024, 1, 1), date(2025, 1, 1))
        .await
        .unwrap();
    assert_eq!(series.len(), 3);
}

#[tokio::test]
async fn test_unknown_symbol_and_inverted_range_are_empty() {
    let provider = InMemoryMarketDataProvider::new().with_series("MSFT", bars(10));

    let unknown = provider
        .fetch_history("NOPE", date(2024, 1, 1), date(2025, 1, 1))
        .await
        .unwrap();
    assert!(unknown.is_empty());

    let inverted = provider
        .fetch_history("MSFT", date(2024, 1, 8), date(2024, 1, 2))
        .await
        .unwrap();
    assert!(inverted.is_empty());
}

#[tokio::test]
async fn test_failing_provider_reports_cause() {
    let provider = InMemoryMarketDataProvider::failing("connection refused");
    let err = provider
        .fetch_history("MSFT", date(2024, 1, 1), date(2025, 1, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Unavailable(_)));
    assert!(err.to_string().contains("connection refused"));
    assert_eq!(provider.name(), "in-memory");
}
