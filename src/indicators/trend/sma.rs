//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::moving_average::MovingAverage;
use crate::models::price::PriceSeries;

/// Trailing SMA over an arbitrary numeric sequence.
///
/// The result has the same length as `values`; the first `window - 1` entries
/// are `None`, and everything is `None` when `window > values.len()`.
pub fn simple_moving_average(values: &[f64], window: usize) -> Result<MovingAverage, IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::InvalidWindow(window));
    }

    Ok(MovingAverage {
        window,
        values: math::rolling_mean(values, window),
    })
}

/// SMA of the closing prices of a series
pub fn calculate_sma(series: &PriceSeries, window: usize) -> Result<MovingAverage, IndicatorError> {
    simple_moving_average(&series.closes(), window)
}
