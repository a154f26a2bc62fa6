//! Alpha Vantage daily time-series provider.
//!
//! Both operations hit `TIME_SERIES_DAILY_ADJUSTED`; the latest price is the
//! newest row of the compact series. The API key travels in the query string
//! and is redacted from every logged target.

use reqwest::Url;

use super::fetch::{log_request, Operation, PayloadFetcher, ProviderRequest};
use super::payload::{extract_history, extract_latest_price};
use super::provider::{DataError, HistoryPoint, LatestPrice, MarketDataProvider};

/// Source tag attached to every logged request.
pub const SOURCE_TAG: &str = "alpha_vantage";
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

const FUNCTION: &str = "TIME_SERIES_DAILY_ADJUSTED";
/// Rows in a compact response; larger windows need the full series.
const COMPACT_ROWS: usize = 100;
const REDACTED: &str = "***";

/// Read the API key from `var`. Missing or blank is a configuration error.
pub fn api_key_from_env(var: &str) -> Result<String, DataError> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(DataError::Configuration(format!(
            "environment variable {var} is not set; an API key is required for live mode"
        ))),
    }
}

pub struct AlphaVantageProvider<F: PayloadFetcher> {
    fetcher: F,
    base_url: String,
    api_key: String,
}

impl<F: PayloadFetcher> AlphaVantageProvider<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn url_with_key(&self, symbol: &str, output_size: &str, key: &str) -> Result<Url, DataError> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("function", FUNCTION),
                ("symbol", symbol),
                ("outputsize", output_size),
                ("apikey", key),
            ],
        )
        .map_err(|e| DataError::Configuration(format!("invalid base URL '{}': {e}", self.base_url)))
    }

    /// Build the request for `operation`; `count` only matters for history.
    pub fn request(
        &self,
        operation: Operation,
        symbol: &str,
        count: usize,
    ) -> Result<ProviderRequest, DataError> {
        let output_size = match operation {
            Operation::History if count > COMPACT_ROWS => "full",
            _ => "compact",
        };
        let url = self.url_with_key(symbol, output_size, &self.api_key)?;
        let target = self.url_with_key(symbol, output_size, REDACTED)?;
        Ok(ProviderRequest {
            source: SOURCE_TAG,
            operation,
            symbol: symbol.to_string(),
            url: url.into(),
            target: target.into(),
        })
    }

    fn send(
        &self,
        operation: Operation,
        symbol: &str,
        count: usize,
    ) -> Result<serde_json::Value, DataError> {
        let request = self.request(operation, symbol, count)?;
        log_request(&request);
        self.fetcher.fetch(&request)
    }
}

impl<F: PayloadFetcher> MarketDataProvider for AlphaVantageProvider<F> {
    fn name(&self) -> &str {
        SOURCE_TAG
    }

    fn latest_close(&self, symbol: &str) -> Result<LatestPrice, DataError> {
        let payload = self.send(Operation::LatestPrice, symbol, 1)?;
        extract_latest_price(&payload)
    }

    fn daily_history(&self, symbol: &str, count: usize) -> Result<Vec<HistoryPoint>, DataError> {
        let payload = self.send(Operation::History, symbol, count)?;
        extract_history(&payload, count)
    }
}
