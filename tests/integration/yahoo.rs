//! Integration tests for the Yahoo Finance client against a mocked chart API

use chrono::NaiveDate;
use serde_json::json;
use stockdash::config::AnalysisSettings;
use stockdash::core::pipeline::{run_pipeline, PipelineError};
use stockdash::models::run::RunInputs;
use stockdash::services::market_data::{FetchError, MarketDataProvider};
use stockdash::services::yahoo::YahooFinanceClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Three NYSE sessions; the middle one has a null close and must be skipped
fn chart_body() -> serde_json::Value {
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "gmtoffset": -18000 },
                "timestamp": [1609770600, 1609857000, 1609943400],
                "indicators": {
                    "quote": [{
                        "open":   [133.52, 128.89, 127.72],
                        "high":   [133.61, 131.74, 131.05],
                        "low":    [126.76, 128.43, 126.38],
                        "close":  [129.41, null,   126.60],
                        "volume": [143301900, 97664900, null]
                    }],
                    "adjclose": [{ "adjclose": [127.33, null, 124.57] }]
                }
            }],
            "error": null
        }
    })
}

async fn mount_chart(server: &MockServer, symbol: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{}", symbol)))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_history_parses_daily_bars() {
    let server = MockServer::start().await;
    mount_chart(&server, "AAPL", 200, chart_body()).await;

    let client = YahooFinanceClient::with_base_url(server.uri());
    let series = client
        .fetch_history("AAPL", date(2021, 1, 4), date(2021, 1, 7))
        .await
        .expect("chart parses");

    assert_eq!(series.len(), 2);
    let bars = series.bars();
    assert_eq!(bars[0].date, date(2021, 1, 4));
    assert_eq!(bars[0].close, 129.41);
    assert_eq!(bars[0].adj_close, 127.33);
    assert_eq!(bars[0].volume, 143301900);
    assert_eq!(bars[1].date, date(2021, 1, 6));
    assert_eq!(bars[1].volume, 0);
}

#[tokio::test]
async fn fetch_history_sends_unix_range() {
    let server = MockServer::start().await;
    mount_chart(&server, "AAPL", 200, chart_body()).await;

    let client = YahooFinanceClient::with_base_url(server.uri());
    client
        .fetch_history("AAPL", date(2021, 1, 1), date(2021, 2, 1))
        .await
        .expect("chart parses");

    let requests = server.received_requests().await.expect("wiremock requests");
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("period1=1609459200"));
    assert!(query.contains("period2=1612137600"));
}

#[tokio::test]
async fn unknown_symbol_is_an_empty_series() {
    let server = MockServer::start().await;
    let body = json!({
        "chart": {
            "result": null,
            "error": {
                "code": "Not Found",
                "description": "No data found, symbol may be delisted"
            }
        }
    });
    mount_chart(&server, "NOPE", 404, body).await;

    let client = YahooFinanceClient::with_base_url(server.uri());
    let series = client
        .fetch_history("NOPE", date(2021, 1, 1), date(2022, 1, 1))
        .await
        .expect("unknown symbol is not an error");
    assert!(series.is_empty());
}

#[tokio::test]
async fn provider_error_is_a_fetch_error() {
    let server = MockServer::start().await;
    let body = json!({
        "chart": {
            "result": null,
            "error": {
                "code": "Bad Request",
                "description": "Invalid input - start date cannot be after end date"
            }
        }
    });
    mount_chart(&server, "AAPL", 400, body).await;

    let client = YahooFinanceClient::with_base_url(server.uri());
    let err = client
        .fetch_history("AAPL", date(2021, 1, 1), date(2022, 1, 1))
        .await
        .unwrap_err();

    match err {
        FetchError::Provider { code, description } => {
            assert_eq!(code, "Bad Request");
            assert!(description.contains("start date"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_without_json_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let client = YahooFinanceClient::with_base_url(server.uri());
    let err = client
        .fetch_history("AAPL", date(2021, 1, 1), date(2022, 1, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 429, .. }));
    assert!(err.to_string().contains("Too Many Requests"));
}

#[tokio::test]
async fn empty_range_skips_the_request() {
    let server = MockServer::start().await;
    let client = YahooFinanceClient::with_base_url(server.uri());

    let series = client
        .fetch_history("AAPL", date(2022, 1, 1), date(2021, 1, 1))
        .await
        .unwrap();
    assert!(series.is_empty());

    let requests = server.received_requests().await.expect("wiremock requests");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn unreachable_host_surfaces_as_fetch_error_in_pipeline() {
    // Nothing listens on port 9 locally
    let client = YahooFinanceClient::with_base_url("http://127.0.0.1:9");
    let inputs = RunInputs::new("AAPL", date(2021, 1, 1), date(2022, 1, 1));

    let err = run_pipeline(&client, &inputs, &AnalysisSettings::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Fetch(FetchError::Request(_))));
    assert!(err.to_string().starts_with("Error fetching data:"));
}

#[tokio::test]
async fn unparsable_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = YahooFinanceClient::with_base_url(server.uri());
    let err = client
        .fetch_history("AAPL", date(2021, 1, 1), date(2022, 1, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn server_error_without_chart_error_is_a_status_error() {
    let server = MockServer::start().await;
    let body = json!({ "chart": { "result": null, "error": null } });
    mount_chart(&server, "AAPL", 503, body).await;

    let client = YahooFinanceClient::with_base_url(server.uri());
    let err = client
        .fetch_history("AAPL", date(2021, 1, 1), date(2022, 1, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 503, .. }));
}

#[tokio::test]
async fn positive_gmtoffset_shifts_to_exchange_date() {
    let server = MockServer::start().await;
    // 2021-01-03T15:00:00Z is midnight of 2021-01-04 in Tokyo
    let body = json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "7203.T", "gmtoffset": 32400 },
                "timestamp": [1609686000],
                "indicators": {
                    "quote": [{
                        "open":   [7150.0],
                        "high":   [7198.0],
                        "low":    [7051.0],
                        "close":  [7087.0],
                        "volume": [5338900]
                    }]
                }
            }],
            "error": null
        }
    });
    mount_chart(&server, "7203.T", 200, body).await;

    let client = YahooFinanceClient::with_base_url(server.uri());
    let series = client
        .fetch_history("7203.T", date(2021, 1, 1), date(2021, 1, 8))
        .await
        .expect("chart parses");

    assert_eq!(series.len(), 1);
    let bar = &series.bars()[0];
    assert_eq!(bar.date, date(2021, 1, 4));
    // No adjclose column falls back to the close
    assert_eq!(bar.adj_close, 7087.0);
}

#[tokio::test]
async fn blank_symbol_is_no_data_without_a_request() {
    let server = MockServer::start().await;
    let client = YahooFinanceClient::with_base_url(server.uri());
    let inputs = RunInputs::new("", date(2021, 1, 1), date(2022, 1, 1));

    let err = run_pipeline(&client, &inputs, &AnalysisSettings::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::NoData { .. }));

    let requests = server.received_requests().await.expect("wiremock requests");
    assert!(requests.is_empty());
}
