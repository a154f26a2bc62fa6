//! The 43-factor model: reference table, synthetic generator, scoring and
//! horizon simulation.
//!
//! Draw protocol per instrument, against one shared stream:
//! 1. sector (1 draw), price (1 draw)
//! 2. 43 factors x 4 draws, in table order
//! 3. horizons short, medium, long, 4 draws each

pub mod factors;
pub mod generator;
pub mod horizon;
pub mod scoring;

pub use factors::{factor_table, Factor, FactorGroup, FACTOR_COUNT};
pub use generator::{generate_instrument, identifier_for, InstrumentStub};
pub use horizon::{simulate_returns, Horizon};
pub use scoring::{score_breakdown, score_growth, FactorContribution};

use crate::domain::InstrumentRecord;
use crate::rng::SeededRng;

/// Draws consumed by one fully scored instrument.
pub const DRAWS_PER_INSTRUMENT: usize = 2 + 4 * FACTOR_COUNT + 4 * 3;

/// Identifier of the instrument appended to every result set.
pub const REQUIRED_IDENTIFIER: &str = "SPY";
/// Display name of the required instrument.
pub const REQUIRED_NAME: &str = "SPDR S&P 500 ETF Trust";

/// Score a stub: growth first, then horizon returns.
pub fn score_stub(stub: InstrumentStub, rng: &mut SeededRng) -> InstrumentRecord {
    let growth = score_growth(rng, factor_table());
    let returns = simulate_returns(rng);
    InstrumentRecord::new(
        stub.identifier,
        stub.name,
        stub.sector,
        stub.current_price,
        growth,
        returns,
    )
}

/// Generate and score the instrument at `index`.
pub fn synthesize(index: u64, rng: &mut SeededRng) -> InstrumentRecord {
    let stub = generate_instrument(index, rng);
    score_stub(stub, rng)
}

/// Build the required instrument from its own stream.
///
/// Uses the same sector, price, scoring and horizon draws as any generated
/// instrument, only the identity is fixed.
pub fn synthesize_required(rng: &mut SeededRng) -> InstrumentRecord {
    let stub = InstrumentStub {
        identifier: REQUIRED_IDENTIFIER.to_string(),
        name: REQUIRED_NAME.to_string(),
        sector: generator::draw_sector(rng),
        current_price: generator::draw_price(rng),
    };
    score_stub(stub, rng)
}
