//! Trailing returns over fixed trading-day windows.

use super::provider::{DataError, HistoryPoint};
use crate::domain::HorizonReturns;

/// Trading-day offsets for the ~3, ~6 and ~12 month windows.
pub const TRAILING_OFFSETS: [usize; 3] = [63, 126, 252];

/// History points needed to compute every trailing window.
pub const HISTORY_WINDOW: usize = 252 + 1;

/// Percentage change from `closes[len - 1 - offset]` to the last close.
///
/// `closes` must be ascending by date and hold at least `offset + 1` values.
pub fn trailing_return(closes: &[f64], offset: usize) -> Result<f64, DataError> {
    let required = offset + 1;
    if closes.len() < required {
        return Err(DataError::InsufficientHistory {
            required,
            available: closes.len(),
        });
    }
    let end = closes[closes.len() - 1];
    let start = closes[closes.len() - 1 - offset];
    if start == 0.0 {
        return Err(DataError::InvalidReturn(format!(
            "start close is zero for offset {offset}"
        )));
    }
    let pct = (end - start) / start * 100.0;
    if !pct.is_finite() {
        return Err(DataError::InvalidReturn(format!(
            "non-finite return for offset {offset}"
        )));
    }
    Ok(pct)
}

/// Trailing 3/6/12 month returns from an ascending history.
pub fn horizon_returns(history: &[HistoryPoint]) -> Result<HorizonReturns, DataError> {
    let closes: Vec<f64> = history.iter().map(|p| p.close).collect();
    let [short, medium, long] = TRAILING_OFFSETS;
    Ok(HorizonReturns {
        return_3: trailing_return(&closes, short)?,
        return_6: trailing_return(&closes, medium)?,
        return_12: trailing_return(&closes, long)?,
    })
}
