//! Deterministic seeded random source.
//!
//! A 32-bit seed drives a Mulberry32 stream of `f64` values in `[0, 1)`.
//! The generator holds no global state and reads no entropy, so two sources
//! built from the same seed yield the same sequence element for element.
//!
//! The order in which the model consumes draws is part of the determinism
//! contract: callers thread one `&mut SeededRng` through every stage instead
//! of reaching for a shared generator.

use rand::{Error, RngCore, SeedableRng};

const GOLDEN_GAMMA: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Mulberry32 pseudo-random stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output.
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.step()) / TWO_POW_32
    }

    /// Uniform draw over `[min, max)`.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    /// Uniform pick from a non-empty slice. Consumes exactly one draw.
    ///
    /// # Panics
    /// Panics if `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "pick from empty slice");
        let idx = (self.next_f64() * items.len() as f64).floor() as usize;
        &items[idx.min(items.len() - 1)]
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.step());
        let lo = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Coerce an arbitrary number to a `u32` seed.
///
/// Truncates toward zero and wraps modulo 2^32, so negative and fractional
/// inputs are accepted. NaN and infinities map to 0.
pub fn coerce_seed(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let truncated = value.trunc();
    truncated.rem_euclid(TWO_POW_32) as u32
}
