//! Integration tests for the live data pipeline using frozen provider payloads.
//!
//! The fixtures are real-shaped `TIME_SERIES_DAILY_ADJUSTED` responses with a
//! linear close series, so expected returns can be computed by hand.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use serde_json::Value;
use factorlab_core::data::{
    fetch_snapshot, horizon_returns, AlphaVantageProvider, DataError, ErrorKind, Operation,
    PayloadFetcher, ProviderRequest, HISTORY_WINDOW,
};

fn fixture(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

/// Serves one fixture per operation and records each request.
struct FixtureFetcher {
    latest: Value,
    history: Value,
    seen: Mutex<Vec<ProviderRequest>>,
}

impl FixtureFetcher {
    fn both(name: &str) -> Self {
        Self::split(name, name)
    }

    fn split(latest: &str, history: &str) -> Self {
        Self {
            latest: fixture(latest),
            history: fixture(history),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl PayloadFetcher for FixtureFetcher {
    fn fetch(&self, request: &ProviderRequest) -> Result<Value, DataError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(match request.operation {
            Operation::LatestPrice => self.latest.clone(),
            Operation::History => self.history.clone(),
        })
    }
}

fn provider(fetcher: FixtureFetcher) -> AlphaVantageProvider<FixtureFetcher> {
    AlphaVantageProvider::new(fetcher, "https://www.alphavantage.co/query", "demo")
}

/// Adjusted close of the `i`-th oldest fixture row.
fn adjusted(i: usize) -> f64 {
    400.0 + i as f64 * 0.5 - 1.0
}

#[test]
fn snapshot_from_full_payload() {
    let p = provider(FixtureFetcher::both("spy_daily_adjusted.json"));
    let snap = fetch_snapshot(&p, "SPY", HISTORY_WINDOW).unwrap();

    assert_eq!(snap.latest.price, 528.5);
    assert_eq!(snap.latest.as_of, NaiveDate::from_ymd_opt(2024, 5, 29).unwrap());
    assert_eq!(snap.history.len(), HISTORY_WINDOW);
    for pair in snap.history.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
    assert_eq!(snap.history.last().unwrap().date, snap.latest.as_of);
}

#[test]
fn horizon_returns_from_fixture() {
    let p = provider(FixtureFetcher::both("spy_daily_adjusted.json"));
    let snap = fetch_snapshot(&p, "SPY", HISTORY_WINDOW).unwrap();
    let r = horizon_returns(&snap.history).unwrap();

    // 260 rows, newest is index 259.
    let end = adjusted(259);
    let pct = |offset: usize| (end - adjusted(259 - offset)) / adjusted(259 - offset) * 100.0;
    assert!((r.return_3 - pct(63)).abs() < 1e-9);
    assert!((r.return_6 - pct(126)).abs() < 1e-9);
    assert!((r.return_12 - pct(252)).abs() < 1e-9);
}

#[test]
fn every_request_is_tagged_and_redacted() {
    let fetcher = FixtureFetcher::both("spy_daily_adjusted.json");
    let p = AlphaVantageProvider::new(&fetcher, "https://www.alphavantage.co/query", "TOPSECRET");
    fetch_snapshot(&p, "SPY", HISTORY_WINDOW).unwrap();

    let seen = fetcher.seen.lock().unwrap();
    for req in seen.iter() {
        assert_eq!(req.source, "alpha_vantage");
        assert_eq!(req.symbol, "SPY");
        assert!(!req.target.contains("TOPSECRET"));
        assert!(req.url.contains("TOPSECRET"));
    }
    let history = seen
        .iter()
        .find(|r| r.operation == Operation::History)
        .unwrap();
    assert!(history.url.contains("outputsize=full"));
}

#[test]
fn both_operations_hit_the_fetcher_once() {
    let fetcher = FixtureFetcher::both("spy_daily_adjusted.json");
    let p = AlphaVantageProvider::new(&fetcher, "https://www.alphavantage.co/query", "k");
    fetch_snapshot(&p, "SPY", HISTORY_WINDOW).unwrap();

    let seen = fetcher.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().any(|r| r.operation == Operation::LatestPrice));
    assert!(seen.iter().any(|r| r.operation == Operation::History));
}

#[test]
fn bad_close_inside_window_fails_the_run() {
    let p = provider(FixtureFetcher::split(
        "spy_daily_adjusted.json",
        "spy_bad_close.json",
    ));
    let err = fetch_snapshot(&p, "SPY", HISTORY_WINDOW).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedData);
    assert!(err.to_string().contains("2024-05-15"));
}

#[test]
fn throttle_note_surfaces_provider_text() {
    let p = provider(FixtureFetcher::both("throttle_note.json"));
    let err = fetch_snapshot(&p, "SPY", HISTORY_WINDOW).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Provider);
    assert!(err.to_string().contains("5 calls per minute"));
}

#[test]
fn error_message_surfaces_provider_text() {
    let p = provider(FixtureFetcher::split(
        "error_message.json",
        "spy_daily_adjusted.json",
    ));
    let err = fetch_snapshot(&p, "SPY", HISTORY_WINDOW).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Provider);
    assert!(err.to_string().contains("Invalid API call"));
}

#[test]
fn short_history_is_insufficient() {
    let p = provider(FixtureFetcher::both("spy_daily_adjusted.json"));
    let snap = fetch_snapshot(&p, "SPY", 200).unwrap();
    assert_eq!(snap.history.len(), 200);
    assert!(matches!(
        horizon_returns(&snap.history),
        Err(DataError::InsufficientHistory {
            required: 253,
            available: 200
        })
    ));
}
