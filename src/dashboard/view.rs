//! Renderer-independent description of one dashboard page

use serde::Serialize;

use super::chart::ChartSpec;
use crate::core::pipeline::{PipelineError, RunResult};
use crate::models::price::PriceBar;
use crate::models::run::RunInputs;
use crate::models::signal::{SignalOutcome, TrendSignal};

pub const TITLE: &str = "Stock Analysis Dashboard";
pub const DESCRIPTION: &str = "Welcome to the Stock Analysis Dashboard. Enter a stock symbol to view \
stock data, moving averages, and trend indicators. This tool helps you track the market trends \
and make informed decisions.";
pub const NO_DATA_MESSAGE: &str =
    "No data available for the selected stock. Please check the stock symbol or date range.";
pub const FOOTER: &str = "Built with stockdash | Market data courtesy of Yahoo Finance";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
}

impl Banner {
    pub fn for_outcome(symbol: &str, outcome: &SignalOutcome) -> Self {
        match outcome {
            SignalOutcome::Signal { signal, .. } => Self {
                level: match signal {
                    TrendSignal::Bullish => BannerLevel::Success,
                    TrendSignal::Bearish => BannerLevel::Error,
                },
                message: format!("{} is currently {} based on SMA.", symbol, signal),
            },
            SignalOutcome::InsufficientData {
                observations,
                required,
            } => Self {
                level: BannerLevel::Warning,
                message: format!(
                    "Insufficient data for an SMA signal on {}: {} observations, {} required.",
                    symbol, observations, required
                ),
            },
        }
    }

    pub fn for_error(error: &PipelineError) -> Self {
        let message = match error {
            PipelineError::NoData { .. } => NO_DATA_MESSAGE.to_string(),
            other => other.to_string(),
        };
        Self {
            level: BannerLevel::Error,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub heading: String,
    pub rows: Vec<PriceBar>,
}

/// Latest values of the two averages, shown next to the signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageSummary {
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: &'static str,
    pub description: &'static str,
    pub inputs: RunInputs,
    pub observations: usize,
    pub table: Option<TableView>,
    pub closing_chart: Option<ChartSpec>,
    pub overlay_chart: Option<ChartSpec>,
    pub averages: Vec<AverageSummary>,
    pub banner: Banner,
    pub footer: &'static str,
}

impl DashboardView {
    /// A failed run keeps only the inputs and the error banner
    pub fn from_result(inputs: &RunInputs, result: &RunResult) -> Self {
        let base = Self {
            title: TITLE,
            description: DESCRIPTION,
            inputs: inputs.clone(),
            observations: 0,
            table: None,
            closing_chart: None,
            overlay_chart: None,
            averages: Vec::new(),
            banner: Banner {
                level: BannerLevel::Error,
                message: String::new(),
            },
            footer: FOOTER,
        };

        match result {
            Ok(report) => Self {
                observations: report.observations(),
                table: Some(TableView {
                    heading: format!("Stock Data for {}", inputs.symbol),
                    rows: report.recent.clone(),
                }),
                closing_chart: Some(ChartSpec::closing_price(report)),
                overlay_chart: Some(ChartSpec::moving_averages(report)),
                averages: [&report.fast_sma, &report.slow_sma]
                    .into_iter()
                    .map(|sma| AverageSummary {
                        label: sma.label(),
                        value: sma.last(),
                    })
                    .collect(),
                banner: Banner::for_outcome(&inputs.symbol, &report.outcome),
                ..base
            },
            Err(error) => Self {
                banner: Banner::for_error(error),
                ..base
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        self.table.is_some()
    }
}
