//! Run result: ranked rows, metrics and decision, as returned to the caller.

use chrono::NaiveDate;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use factorlab_core::domain::{HorizonReturns, InstrumentRecord, Sector};

use crate::config::DataMode;
use crate::ranking::{Decision, RunMetrics};

/// Current schema version for persisted results.
pub const SCHEMA_VERSION: u32 = 1;

/// Version tag of the scoring model.
pub const MODEL_VERSION: &str = "factor43-v1";

/// Rank shown for the appended required instrument.
pub const RANK_PLACEHOLDER: &str = "—";

/// Position in the ranking, or the placeholder for the non-competing row.
///
/// Serializes as an integer or as the placeholder string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Position(u32),
    Placeholder,
}

impl Rank {
    pub fn position(self) -> Option<u32> {
        match self {
            Rank::Position(n) => Some(n),
            Rank::Placeholder => None,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Position(n) => write!(f, "{n}"),
            Rank::Placeholder => f.write_str(RANK_PLACEHOLDER),
        }
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rank::Position(n) => serializer.serialize_u32(*n),
            Rank::Placeholder => serializer.serialize_str(RANK_PLACEHOLDER),
        }
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RankVisitor;

        impl<'de> Visitor<'de> for RankVisitor {
            type Value = Rank;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "a positive integer rank or \"{RANK_PLACEHOLDER}\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Rank, E> {
                u32::try_from(v)
                    .ok()
                    .filter(|n| *n > 0)
                    .map(Rank::Position)
                    .ok_or_else(|| E::custom(format!("rank {v} out of range")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Rank, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("rank {v} out of range")))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Rank, E> {
                if v == RANK_PLACEHOLDER {
                    Ok(Rank::Placeholder)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(RankVisitor)
    }
}

/// One row of the result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub rank: Rank,
    pub identifier: String,
    pub name: String,
    pub sector: Sector,
    pub current_price: f64,
    pub predicted_price: f64,
    pub predicted_growth_pct: f64,
    #[serde(flatten)]
    pub returns: HorizonReturns,
}

impl ResultRow {
    pub fn from_record(rank: Rank, record: &InstrumentRecord) -> Self {
        Self {
            rank,
            identifier: record.identifier.clone(),
            name: record.name.clone(),
            sector: record.sector,
            current_price: record.current_price,
            predicted_price: record.predicted_price,
            predicted_growth_pct: record.predicted_growth_pct,
            returns: record.returns,
        }
    }
}

/// Complete result of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub model_version: String,
    pub data_mode: DataMode,
    pub run_date: NaiveDate,
    /// Always `run_date + 1 day`.
    pub horizon_date: NaiveDate,
    pub decision: Decision,
    pub sector_warning: bool,
    pub metrics: RunMetrics,
    pub results: Vec<ResultRow>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl RunResult {
    /// Ranked rows only, without the appended placeholder row.
    pub fn ranked(&self) -> impl Iterator<Item = &ResultRow> {
        self.results
            .iter()
            .filter(|row| row.rank.position().is_some())
    }

    /// BLAKE3 hex digest of the compact JSON form.
    ///
    /// Identical runs produce identical fingerprints.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(self)?;
        Ok(blake3::hash(&json).to_hex().to_string())
    }
}
