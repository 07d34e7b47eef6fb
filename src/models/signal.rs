use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSignal {
    Bullish,
    Bearish,
}

impl fmt::Display for TrendSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendSignal::Bullish => write!(f, "Bullish"),
            TrendSignal::Bearish => write!(f, "Bearish"),
        }
    }
}

/// Result of comparing the fast and slow averages at the final bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignalOutcome {
    Signal {
        signal: TrendSignal,
        fast_value: f64,
        slow_value: f64,
    },
    /// At least one average has no value at the final bar
    InsufficientData { observations: usize, required: usize },
}

impl SignalOutcome {
    pub fn signal(&self) -> Option<TrendSignal> {
        match self {
            SignalOutcome::Signal { signal, .. } => Some(*signal),
            SignalOutcome::InsufficientData { .. } => None,
        }
    }

    /// Label used for the `outcome` metric and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalOutcome::Signal { signal: TrendSignal::Bullish, .. } => "bullish",
            SignalOutcome::Signal { signal: TrendSignal::Bearish, .. } => "bearish",
            SignalOutcome::InsufficientData { .. } => "insufficient_data",
        }
    }
}
