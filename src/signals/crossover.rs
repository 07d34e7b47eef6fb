//! Moving-average trend signal
//!
//! Bullish when the fast average ends strictly above the slow one, bearish
//! otherwise. No signal is produced unless both averages have a value at the
//! final bar.

use crate::models::moving_average::MovingAverage;
use crate::models::signal::{SignalOutcome, TrendSignal};

/// Compare the last values of two averages computed over the same series
pub fn derive_signal(fast: &MovingAverage, slow: &MovingAverage) -> SignalOutcome {
    let observations = fast.len().max(slow.len());

    match (fast.last(), slow.last()) {
        (Some(fast_value), Some(slow_value)) => SignalOutcome::Signal {
            signal: classify(fast_value, slow_value),
            fast_value,
            slow_value,
        },
        _ => SignalOutcome::InsufficientData {
            observations,
            required: fast.window.max(slow.window),
        },
    }
}

/// Equality is bearish
pub fn classify(fast_value: f64, slow_value: f64) -> TrendSignal {
    if fast_value > slow_value {
        TrendSignal::Bullish
    } else {
        TrendSignal::Bearish
    }
}
