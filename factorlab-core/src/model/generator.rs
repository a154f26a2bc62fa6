//! Synthetic instrument generator.
//!
//! Produces the identity, sector and current price of one instrument per draw
//! index. Identifiers and names are pure functions of the index; the sector
//! and the price consume one random draw each, in that order.

use crate::domain::{Sector, PRICE_CEILING, PRICE_FLOOR};
use crate::rng::SeededRng;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MIN_IDENTIFIER_LEN: u32 = 3;

/// Bounds of the log-uniform price draw, before clamping.
const LOG_PRICE_LOW: f64 = 5.0;
const LOG_PRICE_HIGH: f64 = 450.0;

const NAME_SUFFIXES: [&str; 8] = [
    "Holdings",
    "Corp",
    "Group",
    "Industries",
    "Systems",
    "Partners",
    "Labs",
    "Capital",
];

/// Identity and price of a generated instrument, before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentStub {
    pub identifier: String,
    pub name: String,
    pub sector: Sector,
    pub current_price: f64,
}

/// Identifier for draw index `index`.
///
/// Indices are bucketed by length: the first 26^3 map to `AAA..ZZZ`, the next
/// 26^4 to `AAAA..ZZZZ`, and so on. Distinct indices never share an identifier.
pub fn identifier_for(index: u64) -> String {
    let mut len = MIN_IDENTIFIER_LEN;
    let mut remaining = index;
    loop {
        let bucket = 26u64.pow(len);
        if remaining < bucket {
            break;
        }
        remaining -= bucket;
        len += 1;
    }

    let mut chars = vec![b'A'; len as usize];
    for slot in chars.iter_mut().rev() {
        *slot = ALPHABET[(remaining % 26) as usize];
        remaining /= 26;
    }
    String::from_utf8(chars).unwrap_or_default()
}

/// Display name for draw index `index`.
pub fn display_name(identifier: &str, index: u64) -> String {
    let suffix = NAME_SUFFIXES[(index % NAME_SUFFIXES.len() as u64) as usize];
    format!("{identifier} {suffix}")
}

/// Draw a sector uniformly from the fixed sector set (one draw).
pub fn draw_sector(rng: &mut SeededRng) -> Sector {
    *rng.pick(&Sector::ALL)
}

/// Draw a log-uniform price over [5, 450], clamped to [2.5, 1000] (one draw).
pub fn draw_price(rng: &mut SeededRng) -> f64 {
    let log_price = rng.uniform(LOG_PRICE_LOW.ln(), LOG_PRICE_HIGH.ln());
    log_price.exp().clamp(PRICE_FLOOR, PRICE_CEILING)
}

/// Generate the stub for draw index `index`.
pub fn generate_instrument(index: u64, rng: &mut SeededRng) -> InstrumentStub {
    let identifier = identifier_for(index);
    let name = display_name(&identifier, index);
    let sector = draw_sector(rng);
    let current_price = draw_price(rng);
    InstrumentStub {
        identifier,
        name,
        sector,
        current_price,
    }
}
