//! Shared data models spanning the pipeline and dashboard layers.

pub mod moving_average;
pub mod price;
pub mod run;
pub mod signal;

pub use moving_average::MovingAverage;
pub use price::{PriceBar, PriceSeries};
pub use run::{AnalysisReport, RunInputs};
pub use signal::{SignalOutcome, TrendSignal};
