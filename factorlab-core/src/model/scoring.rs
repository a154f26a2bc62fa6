//! Factor scoring engine.
//!
//! Each factor gets a bell-shaped raw value from four uniform draws, squashed
//! through a logistic into (0, 1) and weighted by its fractional weight. The
//! weighted total lies in (0, 1) and is mapped affinely onto the growth range.

use serde::Serialize;

use super::factors::Factor;
use crate::domain::{GROWTH_CEILING_PCT, GROWTH_FLOOR_PCT};
use crate::rng::SeededRng;

/// Scale applied to the centered sum of four uniforms.
const RAW_SCALE: f64 = 1.25;
/// Affine map from the (0, 1) total onto the growth percentage range.
const GROWTH_SLOPE: f64 = 3.5;
const GROWTH_OFFSET: f64 = -1.5;

/// One factor's share of an instrument's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorContribution {
    pub factor_id: u8,
    pub raw: f64,
    pub normalized: f64,
    pub weighted: f64,
}

/// Standard logistic function.
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Approximately normal raw factor value centered at 0 (four draws).
pub fn draw_raw_factor(rng: &mut SeededRng) -> f64 {
    let sum = rng.next_f64() + rng.next_f64() + rng.next_f64() + rng.next_f64();
    (sum - 2.0) * RAW_SCALE
}

/// Map a weighted total in (0, 1) onto the clamped growth percentage.
pub fn total_to_growth_pct(total: f64) -> f64 {
    (total * GROWTH_SLOPE + GROWTH_OFFSET).clamp(GROWTH_FLOOR_PCT, GROWTH_CEILING_PCT)
}

/// Score one instrument, returning its predicted growth percentage.
///
/// Consumes exactly `4 * factors.len()` draws, factor by factor in table order.
pub fn score_growth(rng: &mut SeededRng, factors: &[Factor]) -> f64 {
    let total: f64 = factors
        .iter()
        .map(|factor| logistic(draw_raw_factor(rng)) * factor.weight_fraction())
        .sum();
    total_to_growth_pct(total)
}

/// Same draws and result as [`score_growth`], keeping each factor's contribution.
pub fn score_breakdown(rng: &mut SeededRng, factors: &[Factor]) -> (f64, Vec<FactorContribution>) {
    let mut total = 0.0;
    let mut contributions = Vec::with_capacity(factors.len());
    for factor in factors {
        let raw = draw_raw_factor(rng);
        let normalized = logistic(raw);
        let weighted = normalized * factor.weight_fraction();
        total += weighted;
        contributions.push(FactorContribution {
            factor_id: factor.id,
            raw,
            normalized,
            weighted,
        });
    }
    (total_to_growth_pct(total), contributions)
}
