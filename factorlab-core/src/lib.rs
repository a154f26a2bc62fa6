//! FactorLab Core: seeded random source, 43-factor model, synthetic
//! universe and the strict live market-data pipeline.
//!
//! Everything here is deterministic given a seed, except `data`, which talks
//! to the network through the `PayloadFetcher` seam.

pub mod data;
pub mod domain;
pub mod model;
pub mod rng;
pub mod universe;

pub use rng::SeededRng;
pub use universe::{build_universe, coerce_universe_size, Universe};
