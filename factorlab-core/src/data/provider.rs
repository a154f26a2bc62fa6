//! Market-data provider contract and structured error types.
//!
//! The `MarketDataProvider` trait abstracts over the external source so the
//! live pipeline can be driven by a scripted provider in tests. Every failure
//! is explicit: providers never hand back empty or defaulted data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad classification of a [`DataError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A required credential or setting is absent.
    Configuration,
    /// Transport-level failure reaching the provider.
    Network,
    /// The provider answered with an application-level error.
    Provider,
    /// The payload is present but structurally or numerically invalid.
    MalformedData,
}

/// Structured error types for the live data pipeline.
///
/// Messages are meant to be shown to the user as-is.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("network unreachable: {0}")]
    Network(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("malformed data: {0}")]
    MalformedData(String),

    #[error("insufficient history: need {required} points, got {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("invalid return: {0}")]
    InvalidReturn(String),
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::Configuration(_) => ErrorKind::Configuration,
            DataError::Network(_) => ErrorKind::Network,
            DataError::Provider(_) => ErrorKind::Provider,
            DataError::MalformedData(_)
            | DataError::InsufficientHistory { .. }
            | DataError::InvalidReturn(_) => ErrorKind::MalformedData,
        }
    }
}

/// Most recent daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatestPrice {
    pub price: f64,
    pub as_of: NaiveDate,
}

/// One validated daily close. `close` is finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Trait for market-data providers.
///
/// Both operations fail explicitly on missing data, throttling or unexpected
/// payloads. `daily_history` returns at most `count` points, ascending by date.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Latest daily close for `symbol`.
    fn latest_close(&self, symbol: &str) -> Result<LatestPrice, DataError>;

    /// Up to `count` most recent daily closes for `symbol`, ascending by date.
    fn daily_history(&self, symbol: &str, count: usize) -> Result<Vec<HistoryPoint>, DataError>;
}

/// Latest price and history for one symbol, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSnapshot {
    pub symbol: String,
    pub latest: LatestPrice,
    pub history: Vec<HistoryPoint>,
}

/// Fetch latest price and history concurrently and join both.
///
/// The two requests are independent; if either fails the snapshot fails and
/// the other branch's result is dropped. The latest-price error wins when
/// both fail.
pub fn fetch_snapshot(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    history_count: usize,
) -> Result<LiveSnapshot, DataError> {
    let (latest, history) = rayon::join(
        || provider.latest_close(symbol),
        || provider.daily_history(symbol, history_count),
    );
    Ok(LiveSnapshot {
        symbol: symbol.to_string(),
        latest: latest?,
        history: history?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider {
        latest: Result<f64, String>,
        history: Result<usize, String>,
    }

    impl MarketDataProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn latest_close(&self, _symbol: &str) -> Result<LatestPrice, DataError> {
            match &self.latest {
                Ok(price) => Ok(LatestPrice {
                    price: *price,
                    as_of: NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
                }),
                Err(msg) => Err(DataError::Provider(msg.clone())),
            }
        }

        fn daily_history(&self, _symbol: &str, count: usize) -> Result<Vec<HistoryPoint>, DataError> {
            match &self.history {
                Ok(n) => {
                    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
                    Ok((0..(*n).min(count))
                        .map(|i| HistoryPoint {
                            date: start + chrono::Duration::days(i as i64),
                            close: 100.0 + i as f64,
                        })
                        .collect())
                }
                Err(msg) => Err(DataError::Network(msg.clone())),
            }
        }
    }

    #[test]
    fn snapshot_joins_both_branches() {
        let p = FixedProvider {
            latest: Ok(101.5),
            history: Ok(300),
        };
        let snap = fetch_snapshot(&p, "SPY", 253).unwrap();
        assert_eq!(snap.symbol, "SPY");
        assert_eq!(snap.latest.price, 101.5);
        assert_eq!(snap.history.len(), 253);
    }

    #[test]
    fn snapshot_fails_when_history_fails() {
        let p = FixedProvider {
            latest: Ok(101.5),
            history: Err("connection reset".into()),
        };
        let err = fetch_snapshot(&p, "SPY", 253).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[test]
    fn latest_error_wins_when_both_fail() {
        let p = FixedProvider {
            latest: Err("Invalid API call".into()),
            history: Err("timeout".into()),
        };
        let err = fetch_snapshot(&p, "SPY", 253).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Provider);
        assert!(err.to_string().contains("Invalid API call"));
    }

    #[test]
    fn insufficient_history_is_malformed_data() {
        let err = DataError::InsufficientHistory {
            required: 253,
            available: 100,
        };
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        assert_eq!(err.to_string(), "insufficient history: need 253 points, got 100");
    }
}
