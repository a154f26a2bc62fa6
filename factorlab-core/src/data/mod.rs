//! Live market-data pipeline: fetch, parse, validate, compute trailing returns.

pub mod alpha_vantage;
pub mod fetch;
pub mod payload;
pub mod provider;
pub mod returns;

pub use alpha_vantage::{api_key_from_env, AlphaVantageProvider};
pub use fetch::{HttpFetcher, Operation, PayloadFetcher, ProviderRequest};
pub use provider::{
    fetch_snapshot, DataError, ErrorKind, HistoryPoint, LatestPrice, LiveSnapshot,
    MarketDataProvider,
};
pub use returns::{horizon_returns, trailing_return, HISTORY_WINDOW, TRAILING_OFFSETS};
