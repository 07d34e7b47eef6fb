//! Market data provider interface and an in-memory implementation.

use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::price::{PriceBar, PriceSeries};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{code}: {description}")]
    Provider { code: String, description: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for `symbol` with `start <= date < end`.
    ///
    /// An unknown symbol or an empty range is an empty series, not an error.
    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError>;

    fn name(&self) -> &'static str;
}

/// Serves fixed bars per symbol; used offline and in tests
#[derive(Debug, Default)]
pub struct InMemoryMarketDataProvider {
    bars: HashMap<String, Vec<PriceBar>>,
    failure: Option<String>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.bars.insert(symbol.to_uppercase(), bars);
        self
    }

    /// Provider whose every call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            bars: HashMap::new(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError> {
        if let Some(message) = &self.failure {
            return Err(FetchError::Unavailable(message.clone()));
        }

        let bars = self
            .bars
            .get(&symbol.to_uppercase())
            .map(|bars| {
                bars.iter()
                    .filter(|bar| bar.date >= start && bar.date < end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(PriceSeries::from_bars(bars))
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}
