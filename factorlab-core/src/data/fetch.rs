//! Raw payload fetching over HTTP.
//!
//! A `PayloadFetcher` turns one `ProviderRequest` into a JSON value and
//! nothing more: interpretation of the payload belongs to the parser. Every
//! request is logged before the response is awaited, so failed attempts are
//! as visible as successful ones.

use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use super::provider::DataError;

/// The two operations a live run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    LatestPrice,
    History,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::LatestPrice => "latest_price",
            Operation::History => "history",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound request.
///
/// `url` is what gets requested; `target` is the same URL with secrets
/// redacted and is the only form that may be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub source: &'static str,
    pub operation: Operation,
    pub symbol: String,
    pub url: String,
    pub target: String,
}

/// Log an outbound request. Called before the response is awaited.
pub fn log_request(request: &ProviderRequest) {
    info!(
        source = request.source,
        operation = request.operation.as_str(),
        symbol = %request.symbol,
        target = %request.target,
        requested_at = %Utc::now().to_rfc3339(),
        "provider request"
    );
}

/// Transport seam: fetch one request's raw JSON payload.
pub trait PayloadFetcher: Send + Sync {
    fn fetch(&self, request: &ProviderRequest) -> Result<Value, DataError>;
}

impl<T: PayloadFetcher + ?Sized> PayloadFetcher for &T {
    fn fetch(&self, request: &ProviderRequest) -> Result<Value, DataError> {
        (**self).fetch(request)
    }
}

/// Blocking HTTP fetcher. No retries: a failed request fails the run.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("factorlab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl PayloadFetcher for HttpFetcher {
    fn fetch(&self, request: &ProviderRequest) -> Result<Value, DataError> {
        let resp = self.client.get(&request.url).send().map_err(|e| {
            warn!(
                operation = request.operation.as_str(),
                symbol = %request.symbol,
                error = %e,
                "provider request failed"
            );
            DataError::Network(format!("{} {}: {e}", request.operation, request.symbol))
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(
                operation = request.operation.as_str(),
                symbol = %request.symbol,
                %status,
                "provider returned non-success status"
            );
            return Err(DataError::Provider(format!(
                "HTTP {status} for {} {}",
                request.operation, request.symbol
            )));
        }

        resp.json::<Value>().map_err(|e| {
            DataError::MalformedData(format!(
                "response for {} {} is not valid JSON: {e}",
                request.operation, request.symbol
            ))
        })
    }
}
