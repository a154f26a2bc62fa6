//! Ranking and decision: top-K by predicted growth, run metrics, trade rule
//! and sector-concentration warning.
//!
//! The required instrument never competes: it is appended after the top set
//! with a placeholder rank and is excluded from every metric.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use factorlab_core::domain::{InstrumentRecord, Sector};

use crate::result::{Rank, ResultRow};

/// Size of the ranked top set.
pub const TOP_K: usize = 10;
/// Minimum average top-K growth for a trade.
pub const AVG_GROWTH_THRESHOLD_PCT: f64 = 0.50;
/// Minimum top-K dispersion (max − min) for a trade.
pub const DISPERSION_THRESHOLD_PCT: f64 = 0.60;
/// Sector count within the top set at which the concentration warning fires.
pub const SECTOR_WARNING_THRESHOLD: usize = 7;

/// Trade signal for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "TRADE")]
    Trade,
    #[serde(rename = "NO TRADE")]
    NoTrade,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Trade => "TRADE",
            Decision::NoTrade => "NO TRADE",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregates over the top set only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunMetrics {
    pub avg_top_growth_pct: f64,
    pub dispersion_pct: f64,
    pub max_sector_count: usize,
}

impl RunMetrics {
    /// Compute metrics over `top`. An empty set yields all zeros.
    pub fn compute(top: &[InstrumentRecord]) -> Self {
        if top.is_empty() {
            return Self::default();
        }
        let growth = top.iter().map(|r| r.predicted_growth_pct);
        let sum: f64 = growth.clone().sum();
        let max = growth.clone().fold(f64::NEG_INFINITY, f64::max);
        let min = growth.fold(f64::INFINITY, f64::min);

        Self {
            avg_top_growth_pct: sum / top.len() as f64,
            dispersion_pct: max - min,
            max_sector_count: max_sector_count(top),
        }
    }
}

/// Largest number of records sharing one sector.
pub fn max_sector_count(records: &[InstrumentRecord]) -> usize {
    let mut counts: BTreeMap<Sector, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.sector).or_default() += 1;
    }
    counts.into_values().max().unwrap_or(0)
}

/// `TRADE` iff both thresholds hold.
pub fn decide(metrics: &RunMetrics) -> Decision {
    if metrics.avg_top_growth_pct >= AVG_GROWTH_THRESHOLD_PCT
        && metrics.dispersion_pct >= DISPERSION_THRESHOLD_PCT
    {
        Decision::Trade
    } else {
        Decision::NoTrade
    }
}

/// Informational only; never feeds into `decide`.
pub fn sector_warning(metrics: &RunMetrics) -> bool {
    metrics.max_sector_count >= SECTOR_WARNING_THRESHOLD
}

/// The first `k` records by descending predicted growth.
///
/// The sort is stable, so equal growth keeps input order.
pub fn top_k(instruments: &[InstrumentRecord], k: usize) -> Vec<InstrumentRecord> {
    let mut order: Vec<&InstrumentRecord> = instruments.iter().collect();
    order.sort_by(|a, b| {
        b.predicted_growth_pct
            .partial_cmp(&a.predicted_growth_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.into_iter().take(k).cloned().collect()
}

/// Ranked rows, metrics and signals for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub rows: Vec<ResultRow>,
    pub metrics: RunMetrics,
    pub decision: Decision,
    pub sector_warning: bool,
}

/// Rank the top set and append the required instrument.
pub fn rank_universe(instruments: &[InstrumentRecord], required: &InstrumentRecord) -> Ranking {
    let top = top_k(instruments, TOP_K);
    let metrics = RunMetrics::compute(&top);
    let decision = decide(&metrics);
    let warning = sector_warning(&metrics);

    let mut rows: Vec<ResultRow> = top
        .iter()
        .zip(1u32..)
        .map(|(record, rank)| ResultRow::from_record(Rank::Position(rank), record))
        .collect();
    rows.push(ResultRow::from_record(Rank::Placeholder, required));

    debug!(
        universe = instruments.len(),
        avg = metrics.avg_top_growth_pct,
        dispersion = metrics.dispersion_pct,
        max_sector_count = metrics.max_sector_count,
        decision = decision.as_str(),
        "ranked universe"
    );

    Ranking {
        rows,
        metrics,
        decision,
        sector_warning: warning,
    }
}

/// A single live row ranked 1; metrics are computed over that row alone.
///
/// The live row is numbered rather than given the placeholder because it is
/// the only row in the result, so there is no ranked set for it to sit beside.
pub fn rank_single(record: &InstrumentRecord) -> Ranking {
    let metrics = RunMetrics::compute(std::slice::from_ref(record));
    Ranking {
        rows: vec![ResultRow::from_record(Rank::Position(1), record)],
        metrics,
        decision: decide(&metrics),
        sector_warning: sector_warning(&metrics),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factorlab_core::domain::HorizonReturns;

    fn rec(id: &str, sector: Sector, growth: f64) -> InstrumentRecord {
        InstrumentRecord::new(
            id.into(),
            format!("{id} Corp"),
            sector,
            100.0,
            growth,
            HorizonReturns {
                return_3: 0.0,
                return_6: 0.0,
                return_12: 0.0,
            },
        )
    }

    fn metrics(avg: f64, dispersion: f64) -> RunMetrics {
        RunMetrics {
            avg_top_growth_pct: avg,
            dispersion_pct: dispersion,
            max_sector_count: 1,
        }
    }

    #[test]
    fn decision_requires_both_thresholds() {
        assert_eq!(decide(&metrics(0.50, 0.60)), Decision::Trade);
        assert_eq!(decide(&metrics(0.51, 0.59)), Decision::NoTrade);
        assert_eq!(decide(&metrics(0.49, 2.0)), Decision::NoTrade);
        assert_eq!(decide(&metrics(1.2, 0.61)), Decision::Trade);
    }

    #[test]
    fn decision_serializes_with_space() {
        assert_eq!(serde_json::to_string(&Decision::NoTrade).unwrap(), "\"NO TRADE\"");
        assert_eq!(serde_json::to_string(&Decision::Trade).unwrap(), "\"TRADE\"");
    }

    #[test]
    fn sector_warning_threshold() {
        let eight: Vec<_> = (0..8)
            .map(|i| rec(&format!("E{i}"), Sector::Energy, 1.0))
            .chain((0..2).map(|i| rec(&format!("T{i}"), Sector::Technology, 1.0)))
            .collect();
        assert!(sector_warning(&RunMetrics::compute(&eight)));

        let six: Vec<_> = (0..6)
            .map(|i| rec(&format!("E{i}"), Sector::Energy, 1.0))
            .chain((0..4).map(|i| rec(&format!("T{i}"), Sector::Technology, 1.0)))
            .collect();
        assert!(!sector_warning(&RunMetrics::compute(&six)));

        let seven = RunMetrics {
            max_sector_count: 7,
            ..RunMetrics::default()
        };
        assert!(sector_warning(&seven));
    }

    #[test]
    fn sector_warning_never_changes_decision() {
        let concentrated: Vec<_> = (0..10)
            .map(|i| rec(&format!("E{i}"), Sector::Energy, 0.2 + 0.1 * i as f64))
            .collect();
        let m = RunMetrics::compute(&concentrated);
        assert!(sector_warning(&m));
        assert_eq!(decide(&m), decide(&RunMetrics { max_sector_count: 1, ..m }));
    }

    #[test]
    fn top_k_is_descending_and_stable() {
        let records = vec![
            rec("A", Sector::Energy, 0.5),
            rec("B", Sector::Energy, 1.5),
            rec("C", Sector::Energy, 0.5),
            rec("D", Sector::Energy, 1.9),
            rec("E", Sector::Energy, 0.5),
        ];
        let ids: Vec<String> = top_k(&records, 4).into_iter().map(|r| r.identifier).collect();
        assert_eq!(ids, vec!["D", "B", "A", "C"]);
    }

    #[test]
    fn rank_universe_appends_placeholder_row() {
        let records: Vec<_> = (0..15)
            .map(|i| rec(&format!("X{i:02}"), Sector::Utilities, i as f64 / 10.0))
            .collect();
        let required = rec("SPY", Sector::Financials, 2.0);
        let ranking = rank_universe(&records, &required);

        assert_eq!(ranking.rows.len(), TOP_K + 1);
        for (i, row) in ranking.rows[..TOP_K].iter().enumerate() {
            assert_eq!(row.rank, Rank::Position(i as u32 + 1));
        }
        let last = ranking.rows.last().unwrap();
        assert_eq!(last.rank, Rank::Placeholder);
        assert_eq!(last.identifier, "SPY");

        // Required row's 2.0 growth must not leak into the metrics.
        assert!((ranking.metrics.avg_top_growth_pct - 0.95).abs() < 1e-12);
        assert!((ranking.metrics.dispersion_pct - 0.9).abs() < 1e-12);
        assert_eq!(ranking.metrics.max_sector_count, 10);
        assert!(ranking.sector_warning);
    }

    #[test]
    fn single_row_has_zero_dispersion() {
        let ranking = rank_single(&rec("SPY", Sector::Financials, 1.9));
        assert_eq!(ranking.rows.len(), 1);
        assert_eq!(ranking.rows[0].rank, Rank::Position(1));
        assert_eq!(ranking.metrics.dispersion_pct, 0.0);
        assert_eq!(ranking.decision, Decision::NoTrade);
        assert!(!ranking.sector_warning);
    }

    #[test]
    fn empty_metrics_are_zero() {
        assert_eq!(RunMetrics::compute(&[]), RunMetrics::default());
    }
}
