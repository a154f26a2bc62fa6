use serde::{Deserialize, Serialize};

use super::sector::Sector;

/// Lower bound of any instrument's current price.
pub const PRICE_FLOOR: f64 = 2.5;
/// Upper bound of any instrument's current price.
pub const PRICE_CEILING: f64 = 1000.0;
/// Lower bound of the predicted next-period growth percentage.
pub const GROWTH_FLOOR_PCT: f64 = -1.5;
/// Upper bound of the predicted next-period growth percentage.
pub const GROWTH_CEILING_PCT: f64 = 2.0;
/// Lower bound of each horizon return percentage.
pub const RETURN_FLOOR_PCT: f64 = -85.0;
/// Upper bound of each horizon return percentage.
pub const RETURN_CEILING_PCT: f64 = 220.0;

/// Percentage returns over the 3-, 6- and 12-period horizons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonReturns {
    pub return_3: f64,
    pub return_6: f64,
    pub return_12: f64,
}

/// One scored instrument, synthetic or live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    pub identifier: String,
    pub name: String,
    pub sector: Sector,
    pub current_price: f64,
    pub predicted_price: f64,
    pub predicted_growth_pct: f64,
    #[serde(flatten)]
    pub returns: HorizonReturns,
}

impl InstrumentRecord {
    /// Build a record, deriving the predicted price from the growth percentage.
    ///
    /// Growth is bounded to [-1.5, 2.0], so a positive current price always
    /// yields a positive predicted price.
    pub fn new(
        identifier: String,
        name: String,
        sector: Sector,
        current_price: f64,
        predicted_growth_pct: f64,
        returns: HorizonReturns,
    ) -> Self {
        Self {
            identifier,
            name,
            sector,
            current_price,
            predicted_price: current_price * (1.0 + predicted_growth_pct / 100.0),
            predicted_growth_pct,
            returns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_returns() -> HorizonReturns {
        HorizonReturns {
            return_3: 0.0,
            return_6: 0.0,
            return_12: 0.0,
        }
    }

    #[test]
    fn predicted_price_follows_growth() {
        let r = InstrumentRecord::new(
            "ABC".into(),
            "ABC Holdings".into(),
            Sector::Energy,
            100.0,
            2.0,
            flat_returns(),
        );
        assert!((r.predicted_price - 102.0).abs() < 1e-12);
    }

    #[test]
    fn negative_growth_keeps_price_positive() {
        let r = InstrumentRecord::new(
            "ABC".into(),
            "ABC Holdings".into(),
            Sector::Energy,
            PRICE_FLOOR,
            GROWTH_FLOOR_PCT,
            flat_returns(),
        );
        assert!(r.predicted_price > 0.0);
        assert!(r.predicted_price < r.current_price);
    }

    #[test]
    fn returns_flatten_into_record_json() {
        let r = InstrumentRecord::new(
            "ABC".into(),
            "ABC Holdings".into(),
            Sector::Energy,
            10.0,
            0.5,
            HorizonReturns {
                return_3: 1.0,
                return_6: 2.0,
                return_12: 3.0,
            },
        );
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["return_12"], 3.0);
        assert_eq!(v["sector"], "Energy");
    }
}
