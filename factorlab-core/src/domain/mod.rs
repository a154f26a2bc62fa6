//! Domain types for FactorLab

pub mod instrument;
pub mod sector;

pub use instrument::{
    HorizonReturns, InstrumentRecord, GROWTH_CEILING_PCT, GROWTH_FLOOR_PCT, PRICE_CEILING,
    PRICE_FLOOR, RETURN_CEILING_PCT, RETURN_FLOOR_PCT,
};
pub use sector::Sector;
