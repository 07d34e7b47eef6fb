//! External market data sources

pub mod market_data;
pub mod yahoo;

pub use market_data::{FetchError, InMemoryMarketDataProvider, MarketDataProvider};
pub use yahoo::YahooFinanceClient;
