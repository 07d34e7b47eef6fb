//! Unit tests for the dashboard view model

use chrono::{Duration, NaiveDate};
use stockdash::config::AnalysisSettings;
use stockdash::core::pipeline::{analyze, PipelineError};
use stockdash::dashboard::chart::{ChartSpec, LineStyle};
use stockdash::dashboard::view::{BannerLevel, DashboardView, NO_DATA_MESSAGE};
use stockdash::models::price::{PriceBar, PriceSeries};
use stockdash::models::run::RunInputs;
use stockdash::services::market_data::FetchError;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
}

fn inputs() -> RunInputs {
    RunInputs::new("AAPL", start(), start() + Duration::days(400))
}

fn series(count: usize, step: f64) -> PriceSeries {
    let bars = (0..count)
        .map(|i| {
            let close = 200.0 + step * i as f64;
            PriceBar::new(start() + Duration::days(i as i64), close, close, close, close, 1)
        })
        .collect();
    PriceSeries::from_bars(bars)
}

#[test]
fn test_bullish_run_renders_success_banner() {
    let result = analyze(&inputs(), series(250, 1.0), &AnalysisSettings::default());
    let view = DashboardView::from_result(&inputs(), &result);

    assert!(view.is_complete());
    assert_eq!(view.banner.level, BannerLevel::Success);
    assert_eq!(view.banner.message, "AAPL is currently Bullish based on SMA.");
    assert_eq!(view.table.as_ref().unwrap().heading, "Stock Data for AAPL");
    assert_eq!(view.table.as_ref().unwrap().rows.len(), 5);
    assert_eq!(view.averages.len(), 2);
    assert_eq!(view.averages[0].label, "SMA100");
}

#[test]
fn test_bearish_run_renders_error_banner() {
    let result = analyze(&inputs(), series(250, -0.5), &AnalysisSettings::default());
    let view = DashboardView::from_result(&inputs(), &result);

    assert_eq!(view.banner.level, BannerLevel::Error);
    assert!(view.banner.message.contains("Bearish"));
}

#[test]
fn test_short_run_renders_warning_without_signal() {
    let result = analyze(&inputs(), series(150, 1.0), &AnalysisSettings::default());
    let view = DashboardView::from_result(&inputs(), &result);

    assert!(view.is_complete());
    assert_eq!(view.banner.level, BannerLevel::Warning);
    assert!(!view.banner.message.contains("Bullish"));
    assert!(!view.banner.message.contains("Bearish"));
    assert!(view.banner.message.contains("150 observations"));
    assert_eq!(view.averages[1].value, None);
}

#[test]
fn test_no_data_renders_only_banner() {
    let result = analyze(&inputs(), PriceSeries::empty(), &AnalysisSettings::default());
    let view = DashboardView::from_result(&inputs(), &result);

    assert!(!view.is_complete());
    assert!(view.closing_chart.is_none());
    assert!(view.overlay_chart.is_none());
    assert_eq!(view.banner.message, NO_DATA_MESSAGE);
}

#[test]
fn test_fetch_error_message_includes_cause() {
    let result = Err(PipelineError::Fetch(FetchError::Unavailable("dns failure".into())));
    let view = DashboardView::from_result(&inputs(), &result);

    assert!(view.table.is_none());
    assert_eq!(view.banner.level, BannerLevel::Error);
    assert!(view.banner.message.starts_with("Error fetching data:"));
    assert!(view.banner.message.contains("dns failure"));
    assert_ne!(view.banner.message, NO_DATA_MESSAGE);
}

#[test]
fn test_overlay_chart_has_dashed_averages() {
    let report = analyze(&inputs(), series(250, 1.0), &AnalysisSettings::default()).unwrap();
    let chart = ChartSpec::moving_averages(&report);

    assert_eq!(chart.title, "AAPL - Moving Averages");
    assert!(chart.legend);
    let labels: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Closing Price", "100-Day SMA", "200-Day SMA"]);
    assert_eq!(chart.series[0].style, LineStyle::Solid);
    assert_eq!(chart.series[1].style, LineStyle::Dashed);
    assert_eq!(chart.series[2].style, LineStyle::Dashed);
    assert!(chart.series.iter().all(|s| s.points.len() == 250));

    // SMA200 has one gap-free run starting at its 200th point
    let segments = chart.series[2].segments();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].len(), 51);
}

#[test]
fn test_closing_chart_spans_full_range() {
    let report = analyze(&inputs(), series(30, 1.0), &AnalysisSettings::default()).unwrap();
    let chart = ChartSpec::closing_price(&report);

    assert_eq!(chart.title, "AAPL Closing Price");
    assert_eq!(chart.y_label, "Closing Price");
    assert_eq!(chart.series.len(), 1);
    assert_eq!(chart.date_bounds(), Some((start(), start() + Duration::days(29))));
    assert_eq!(chart.y_bounds(), Some((200.0, 229.0)));
}
