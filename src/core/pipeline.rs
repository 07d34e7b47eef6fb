//! Analysis pipeline: fetch, emptiness check, moving averages, trend signal
//!
//! A run is fully determined by its [`RunInputs`] and the provider's answer.
//! Nothing is cached between runs.

use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AnalysisSettings;
use crate::indicators::{calculate_sma, IndicatorError};
use crate::metrics::Metrics;
use crate::models::price::PriceSeries;
use crate::models::run::{AnalysisReport, RunInputs};
use crate::services::market_data::{FetchError, MarketDataProvider};
use crate::signals::derive_signal;

pub type RunResult = Result<AnalysisReport, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error fetching data: {0}")]
    Fetch(#[from] FetchError),
    #[error("no data for {symbol} between {start} and {end}")]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("invalid analysis settings: {0}")]
    Settings(#[from] IndicatorError),
}

impl PipelineError {
    /// Label used for the `outcome` metric and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineError::Fetch(_) => "fetch_error",
            PipelineError::NoData { .. } => "no_data",
            PipelineError::Settings(_) => "invalid_settings",
        }
    }
}

/// Fetch the series for `inputs` and analyze it
pub async fn run_pipeline(
    provider: &dyn MarketDataProvider,
    inputs: &RunInputs,
    settings: &AnalysisSettings,
) -> RunResult {
    fetch_and_analyze(provider, inputs, settings, None).await
}

async fn fetch_and_analyze(
    provider: &dyn MarketDataProvider,
    inputs: &RunInputs,
    settings: &AnalysisSettings,
    metrics: Option<&Metrics>,
) -> RunResult {
    let started = Instant::now();
    let fetched = provider
        .fetch_history(&inputs.symbol, inputs.start_date, inputs.end_date)
        .await;

    if let Some(metrics) = metrics {
        metrics
            .market_data_fetch_duration_seconds
            .observe(started.elapsed().as_secs_f64());
    }

    analyze(inputs, fetched?, settings)
}

/// Pure part of a run, everything after the fetch
pub fn analyze(inputs: &RunInputs, series: PriceSeries, settings: &AnalysisSettings) -> RunResult {
    if series.is_empty() {
        return Err(PipelineError::NoData {
            symbol: inputs.symbol.clone(),
            start: inputs.start_date,
            end: inputs.end_date,
        });
    }

    let recent = series.tail(settings.table_rows).to_vec();
    let fast_sma = calculate_sma(&series, settings.fast_window)?;
    let slow_sma = calculate_sma(&series, settings.slow_window)?;
    let outcome = derive_signal(&fast_sma, &slow_sma);

    Ok(AnalysisReport {
        inputs: inputs.clone(),
        series,
        recent,
        fast_sma,
        slow_sma,
        outcome,
    })
}

/// Provider plus settings, with run logging and metrics
#[derive(Clone)]
pub struct AnalysisPipeline {
    provider: Arc<dyn MarketDataProvider>,
    settings: AnalysisSettings,
    metrics: Option<Arc<Metrics>>,
}

impl AnalysisPipeline {
    pub fn new(provider: Arc<dyn MarketDataProvider>, settings: AnalysisSettings) -> Self {
        Self {
            provider,
            settings,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub async fn run(&self, inputs: &RunInputs) -> RunResult {
        let started = Instant::now();
        let result = fetch_and_analyze(
            self.provider.as_ref(),
            inputs,
            &self.settings,
            self.metrics.as_deref(),
        )
        .await;

        let outcome = match &result {
            Ok(report) => {
                info!(
                    symbol = %inputs.symbol,
                    start = %inputs.start_date,
                    end = %inputs.end_date,
                    provider = self.provider.name(),
                    rows = report.observations(),
                    fast_sma = ?report.fast_sma.last(),
                    slow_sma = ?report.slow_sma.last(),
                    signal = report.outcome.as_str(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Pipeline run completed"
                );
                report.outcome.as_str()
            }
            Err(e) => {
                warn!(
                    symbol = %inputs.symbol,
                    start = %inputs.start_date,
                    end = %inputs.end_date,
                    provider = self.provider.name(),
                    error = %e,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Pipeline run stopped"
                );
                e.as_str()
            }
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_run(outcome);
        }

        result
    }
}
