//! Horizon return simulator.
//!
//! Each horizon draws a fat-tail switch, then three uniforms whose mean gives a
//! triangular-ish shock scaled by the horizon's baseline volatility. Horizons
//! are always drawn short, medium, long.

use serde::{Deserialize, Serialize};

use crate::domain::{HorizonReturns, RETURN_CEILING_PCT, RETURN_FLOOR_PCT};
use crate::rng::SeededRng;

/// Probability that a horizon draw uses the fat-tail multiplier.
pub const FAT_TAIL_PROBABILITY: f64 = 0.08;
/// Multiplier applied on a fat-tail draw.
pub const FAT_TAIL_MULTIPLIER: f64 = 2.5;

/// Return horizon class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    Short,
    Medium,
    Long,
}

impl Horizon {
    /// Baseline volatility in percentage points.
    pub fn volatility(self) -> f64 {
        match self {
            Horizon::Short => 18.0,
            Horizon::Medium => 28.0,
            Horizon::Long => 45.0,
        }
    }
}

/// Simulate one horizon return (four draws).
pub fn simulate_return(rng: &mut SeededRng, horizon: Horizon) -> f64 {
    let multiplier = if rng.next_f64() < FAT_TAIL_PROBABILITY {
        FAT_TAIL_MULTIPLIER
    } else {
        1.0
    };
    let a = rng.uniform(-1.0, 1.0);
    let b = rng.uniform(-1.0, 1.0);
    let c = rng.uniform(-1.0, 1.0);
    let shock = (a + b + c) / 3.0;
    (shock * horizon.volatility() * multiplier).clamp(RETURN_FLOOR_PCT, RETURN_CEILING_PCT)
}

/// Simulate all three horizons (twelve draws).
///
/// Draw order is short, medium, long; changing it changes every seeded universe.
pub fn simulate_returns(rng: &mut SeededRng) -> HorizonReturns {
    let return_3 = simulate_return(rng, Horizon::Short);
    let return_6 = simulate_return(rng, Horizon::Medium);
    let return_12 = simulate_return(rng, Horizon::Long);
    HorizonReturns {
        return_3,
        return_6,
        return_12,
    }
}
