//! Yahoo Finance daily history

pub mod client;
pub mod messages;

pub use client::YahooFinanceClient;
