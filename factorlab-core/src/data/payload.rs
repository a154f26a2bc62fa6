//! Strict payload parser for daily time-series responses.
//!
//! Both extractions fail closed: a missing series, a missing row or a value
//! that does not parse as a finite positive number aborts the extraction.
//! Provider-signalled errors are surfaced first, carrying the provider's text.
//!
//! Expected shape:
//!
//! ```text
//! { "Time Series (Daily)": {
//!     "2024-06-28": { "4. close": "544.22", "5. adjusted close": "541.10", ... },
//!     ... } }
//! ```

use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::provider::{DataError, HistoryPoint, LatestPrice};

/// Key of the keyed daily series.
pub const SERIES_KEY: &str = "Time Series (Daily)";
/// Preferred close field.
pub const ADJUSTED_CLOSE_FIELD: &str = "5. adjusted close";
/// Fallback close field.
pub const CLOSE_FIELD: &str = "4. close";

/// Top-level keys the provider uses to signal errors, throttling or notices.
const PROVIDER_MESSAGE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Fail with a provider error if the payload carries a provider message.
pub fn check_provider_message(payload: &Value) -> Result<(), DataError> {
    if let Some(obj) = payload.as_object() {
        for key in PROVIDER_MESSAGE_KEYS {
            if let Some(msg) = obj.get(key) {
                let text = msg
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| msg.to_string());
                return Err(DataError::Provider(text));
            }
        }
    }
    Ok(())
}

/// Locate the keyed series, after checking for provider messages.
fn series(payload: &Value) -> Result<&Map<String, Value>, DataError> {
    check_provider_message(payload)?;
    let obj = payload
        .as_object()
        .ok_or_else(|| DataError::MalformedData("response is not a JSON object".into()))?;
    obj.get(SERIES_KEY)
        .ok_or_else(|| DataError::MalformedData(format!("missing '{SERIES_KEY}'")))?
        .as_object()
        .ok_or_else(|| DataError::MalformedData(format!("'{SERIES_KEY}' is not an object")))
}

/// Date keys sorted newest first. ISO dates sort correctly as strings.
fn keys_descending(series: &Map<String, Value>) -> Vec<&str> {
    let mut keys: Vec<&str> = series.keys().map(String::as_str).collect();
    keys.sort_unstable_by(|a, b| b.cmp(a));
    keys
}

fn parse_date(key: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map_err(|_| DataError::MalformedData(format!("invalid date key '{key}'")))
}

/// A finite, strictly positive number from a string or JSON number.
fn parse_price(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }?;
    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

/// Close for one row: adjusted close if it parses, else raw close.
fn row_close(series: &Map<String, Value>, key: &str) -> Result<f64, DataError> {
    let row = series
        .get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| DataError::MalformedData(format!("row {key} is missing or not an object")))?;

    row.get(ADJUSTED_CLOSE_FIELD)
        .and_then(parse_price)
        .or_else(|| row.get(CLOSE_FIELD).and_then(parse_price))
        .ok_or_else(|| {
            DataError::MalformedData(format!(
                "row {key}: neither '{ADJUSTED_CLOSE_FIELD}' nor '{CLOSE_FIELD}' is a finite positive number"
            ))
        })
}

/// Extract the most recent close.
pub fn extract_latest_price(payload: &Value) -> Result<LatestPrice, DataError> {
    let series = series(payload)?;
    let as_of_key = keys_descending(series)
        .into_iter()
        .next()
        .ok_or_else(|| DataError::MalformedData(format!("'{SERIES_KEY}' has no rows")))?;
    let as_of = parse_date(as_of_key)?;
    let price = row_close(series, as_of_key)?;
    Ok(LatestPrice { price, as_of })
}

/// Extract up to `count` most recent closes, validated, ascending by date.
///
/// Every row in the window is validated; one bad row fails the whole history.
pub fn extract_history(payload: &Value, count: usize) -> Result<Vec<HistoryPoint>, DataError> {
    let series = series(payload)?;
    let mut points = keys_descending(series)
        .into_iter()
        .take(count)
        .map(|key| {
            Ok(HistoryPoint {
                date: parse_date(key)?,
                close: row_close(series, key)?,
            })
        })
        .collect::<Result<Vec<_>, DataError>>()?;
    points.sort_by_key(|p| p.date);
    Ok(points)
}
