//! HTTP client for the Yahoo Finance chart API

use chrono::{DateTime, NaiveDate};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::messages::{ChartData, ChartEnvelope};
use crate::config::DEFAULT_YAHOO_BASE_URL;
use crate::models::price::{PriceBar, PriceSeries};
use crate::services::market_data::{FetchError, MarketDataProvider};

const CLIENT_USER_AGENT: &str = "Mozilla/5.0 (compatible; stockdash/0.1)";
const MAX_ERROR_BODY: usize = 512;

pub struct YahooFinanceClient {
    http: Client,
    base_url: String,
}

impl YahooFinanceClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_YAHOO_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// `{base}/v8/finance/chart/{symbol}?period1=..&period2=..&interval=1d`
    pub fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Url, FetchError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);

        url.query_pairs_mut()
            .append_pair("period1", &midnight_timestamp(start).to_string())
            .append_pair("period2", &midnight_timestamp(end).to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history")
            .append_pair("includeAdjustedClose", "true");

        Ok(url)
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooFinanceClient {
    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError> {
        if end <= start {
            debug!(symbol, %start, %end, "Empty date range, skipping request");
            return Ok(PriceSeries::empty());
        }
        if symbol.is_empty() {
            debug!("Blank symbol, skipping request");
            return Ok(PriceSeries::empty());
        }

        let url = self.chart_url(symbol, start, end)?;
        debug!(url = %url, "Requesting Yahoo chart");

        let response = self
            .http
            .get(url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ChartEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(FetchError::Decode(e.to_string())),
            Err(_) => {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    body: truncate(&body, MAX_ERROR_BODY),
                })
            }
        };

        if let Some(error) = envelope.chart.error {
            if error.is_unknown_symbol() {
                warn!(symbol, description = %error.description, "Yahoo does not know this symbol");
                return Ok(PriceSeries::empty());
            }
            return Err(FetchError::Provider {
                code: error.code,
                description: error.description,
            });
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let data = match envelope.chart.result.and_then(|r| r.into_iter().next()) {
            Some(data) => data,
            None => return Ok(PriceSeries::empty()),
        };

        let bars = bars_from_chart(data)?;
        debug!(symbol, rows = bars.len(), "Parsed Yahoo chart");
        Ok(PriceSeries::from_bars(bars))
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}

/// Rows missing any OHLC value are dropped; a missing volume counts as zero.
pub fn bars_from_chart(data: ChartData) -> Result<Vec<PriceBar>, FetchError> {
    let timestamps = match data.timestamp {
        Some(ts) => ts,
        None => return Ok(Vec::new()),
    };
    let offset = data.meta.gmtoffset.unwrap_or(0);
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = data
        .indicators
        .adjclose
        .and_then(|a| a.into_iter().next())
        .map(|a| a.adjclose)
        .unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            at(&quote.open, i),
            at(&quote.high, i),
            at(&quote.low, i),
            at(&quote.close, i),
        ) else {
            continue;
        };

        let date = DateTime::from_timestamp(ts + offset, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| FetchError::Decode(format!("timestamp {} out of range", ts)))?;
        let volume = quote.volume.get(i).copied().flatten().unwrap_or(0);
        let adj_close = at(&adjclose, i).unwrap_or(close);

        bars.push(PriceBar::new(date, open, high, low, close, volume).with_adj_close(adj_close));
    }

    Ok(bars)
}

fn at(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
}

fn midnight_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

fn truncate(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
