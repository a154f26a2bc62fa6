//! Seeded universe builder.
//!
//! One random source feeds the whole universe, instrument after instrument.
//! The required instrument gets its own source, seeded from the same seed
//! XOR a fixed salt, so its values never depend on the universe size.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::InstrumentRecord;
use crate::model::{synthesize, synthesize_required};
use crate::rng::SeededRng;

/// Smallest universe ever generated.
pub const MIN_UNIVERSE_SIZE: usize = 1000;
/// Largest universe ever generated; larger requests are clamped.
pub const MAX_UNIVERSE_SIZE: usize = 1_000_000;
/// Salt mixed into the seed of the required instrument's stream.
pub const REQUIRED_STREAM_SALT: u32 = 0x9E37_79B9;

/// A generated universe plus the non-competing required instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub seed: u32,
    pub instruments: Vec<InstrumentRecord>,
    pub required: InstrumentRecord,
}

impl Universe {
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

/// Coerce a requested size: non-finite → minimum, floor, then clamp.
pub fn coerce_universe_size(requested: f64) -> usize {
    if !requested.is_finite() {
        return MIN_UNIVERSE_SIZE;
    }
    let floored = requested.floor();
    if floored <= MIN_UNIVERSE_SIZE as f64 {
        MIN_UNIVERSE_SIZE
    } else if floored >= MAX_UNIVERSE_SIZE as f64 {
        MAX_UNIVERSE_SIZE
    } else {
        floored as usize
    }
}

/// Seed of the required instrument's independent stream.
pub fn required_stream_seed(seed: u32) -> u32 {
    seed ^ REQUIRED_STREAM_SALT
}

/// Build the required instrument alone.
pub fn build_required(seed: u32) -> InstrumentRecord {
    let mut rng = SeededRng::new(required_stream_seed(seed));
    synthesize_required(&mut rng)
}

/// Build a universe of exactly `size` instruments (already coerced).
pub fn build_universe(seed: u32, size: usize) -> Universe {
    let mut rng = SeededRng::new(seed);
    let instruments: Vec<InstrumentRecord> = (0..size as u64)
        .map(|index| synthesize(index, &mut rng))
        .collect();
    let required = build_required(seed);

    debug!(seed, size, "built synthetic universe");

    Universe {
        seed,
        instruments,
        required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn coercion_floors_and_clamps() {
        assert_eq!(coerce_universe_size(5.0), MIN_UNIVERSE_SIZE);
        assert_eq!(coerce_universe_size(-20.0), MIN_UNIVERSE_SIZE);
        assert_eq!(coerce_universe_size(f64::NAN), MIN_UNIVERSE_SIZE);
        assert_eq!(coerce_universe_size(1500.9), 1500);
        assert_eq!(coerce_universe_size(1e12), MAX_UNIVERSE_SIZE);
    }

    #[test]
    fn builds_exact_size() {
        let u = build_universe(1, 1000);
        assert_eq!(u.len(), 1000);
        assert_eq!(u.instruments[0].identifier, "AAA");
    }

    #[test]
    fn identifiers_unique_within_universe() {
        let u = build_universe(7, 1200);
        let ids: HashSet<&str> = u.instruments.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(ids.len(), 1200);
    }

    #[test]
    fn same_seed_same_universe() {
        assert_eq!(build_universe(12345, 1000), build_universe(12345, 1000));
    }

    #[test]
    fn universe_prefix_is_size_independent() {
        let small = build_universe(99, 1000);
        let large = build_universe(99, 1500);
        assert_eq!(small.instruments[..], large.instruments[..1000]);
    }

    #[test]
    fn required_instrument_is_size_independent() {
        let small = build_universe(42, 1000);
        let large = build_universe(42, 2000);
        assert_eq!(small.required, large.required);
    }

    #[test]
    fn required_stream_differs_from_universe_stream() {
        let u = build_universe(42, 1000);
        let mut plain = SeededRng::new(42);
        let first = synthesize_required(&mut plain);
        assert_ne!(u.required.current_price, first.current_price);
    }
}
