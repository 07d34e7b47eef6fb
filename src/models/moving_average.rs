use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trailing simple moving average aligned index-for-index with its source series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverage {
    pub window: usize,
    pub values: Vec<Option<f64>>,
}

impl MovingAverage {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at the final index, `None` when the window is not yet filled there
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn label(&self) -> String {
        format!("SMA{}", self.window)
    }

    /// Pair each value with the date it belongs to
    pub fn points(&self, dates: &[NaiveDate]) -> Vec<(NaiveDate, Option<f64>)> {
        dates.iter().copied().zip(self.values.iter().copied()).collect()
    }
}
