//! Stock trend dashboard: daily price history, simple moving averages and a
//! bullish/bearish crossover signal, served as an HTML page or printed by a CLI.

pub mod common;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
