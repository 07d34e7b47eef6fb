//! Inputs and outputs of one dashboard run

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::InputDefaults;
use crate::core::clock::Clock;
use crate::models::moving_average::MovingAverage;
use crate::models::price::{PriceBar, PriceSeries};
use crate::models::signal::SignalOutcome;

/// Immutable user inputs for a single pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInputs {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl RunInputs {
    pub fn new(symbol: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start_date,
            end_date,
        }
    }

    /// Fill unset fields from the defaults; the end date defaults to today.
    ///
    /// A supplied symbol is trimmed but otherwise accepted as typed, blank
    /// included. Only a missing symbol takes the default.
    pub fn resolve(
        symbol: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        defaults: &InputDefaults,
        clock: &dyn Clock,
    ) -> Self {
        let symbol = symbol.map(str::trim).unwrap_or(&defaults.symbol).to_string();

        Self {
            symbol,
            start_date: start_date.unwrap_or(defaults.start_date),
            end_date: end_date.unwrap_or_else(|| clock.today()),
        }
    }
}

/// Everything a completed run renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub inputs: RunInputs,
    pub series: PriceSeries,
    pub recent: Vec<PriceBar>,
    pub fast_sma: MovingAverage,
    pub slow_sma: MovingAverage,
    pub outcome: SignalOutcome,
}

impl AnalysisReport {
    pub fn observations(&self) -> usize {
        self.series.len()
    }
}
