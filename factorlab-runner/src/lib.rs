//! FactorLab Runner: run orchestration, ranking and decision, export.
//!
//! This crate builds on `factorlab-core` to provide:
//! - TOML run configuration (mode, seed, universe size, provider settings)
//! - Synthetic and live runs producing one `RunResult`
//! - Top-K ranking, run metrics, trade decision and sector warning
//! - Run lifecycle state machine
//! - JSON / CSV / Markdown export with schema versioning and fingerprints

pub mod config;
pub mod export;
pub mod lifecycle;
pub mod ranking;
pub mod result;
pub mod runner;

pub use config::{ConfigError, DataMode, ProviderSettings, RunConfig, RunParams};
pub use lifecycle::{RunSession, RunState};
pub use ranking::{
    decide, rank_universe, sector_warning, Decision, Ranking, RunMetrics, TOP_K,
};
pub use result::{Rank, ResultRow, RunResult, MODEL_VERSION, SCHEMA_VERSION};
pub use runner::{run, run_live, run_synthetic, RunError};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn run_result_is_send_sync() {
        assert_send::<RunResult>();
        assert_sync::<RunResult>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<RunConfig>();
        assert_sync::<RunConfig>();
        assert_send::<RunParams>();
        assert_sync::<RunParams>();
    }

    #[test]
    fn run_state_is_send_sync() {
        assert_send::<RunState>();
        assert_sync::<RunState>();
        assert_send::<RunSession>();
        assert_sync::<RunSession>();
    }

    #[test]
    fn run_error_is_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
    }
}
