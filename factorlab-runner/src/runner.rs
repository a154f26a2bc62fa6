//! Run orchestration: wires the universe builder, the live data pipeline
//! and the ranker into one `RunResult`.
//!
//! Entry points:
//! - `run_synthetic()`: seeded universe, top-K ranking. Infallible.
//! - `run_live()`: takes any `MarketDataProvider`. Used by tests and by `run()`.
//! - `run()`: dispatches on the configured mode; builds the HTTP provider for
//!   live runs.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::{info, warn};

use factorlab_core::data::{
    api_key_from_env, fetch_snapshot, horizon_returns, AlphaVantageProvider, DataError,
    ErrorKind, HttpFetcher, MarketDataProvider,
};
use factorlab_core::domain::InstrumentRecord;
use factorlab_core::model::{REQUIRED_IDENTIFIER, REQUIRED_NAME};
use factorlab_core::rng::coerce_seed;
use factorlab_core::universe::{build_required, build_universe, coerce_universe_size};

use crate::config::{ConfigError, DataMode, ProviderSettings, RunConfig, RunParams};
use crate::ranking::{rank_single, rank_universe, Ranking};
use crate::result::{RunResult, MODEL_VERSION, SCHEMA_VERSION};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
}

impl RunError {
    /// Error classification. Invalid settings count as configuration errors.
    pub fn data_kind(&self) -> Option<ErrorKind> {
        match self {
            RunError::Data(e) => Some(e.kind()),
            RunError::Config(_) => Some(ErrorKind::Configuration),
        }
    }
}

/// The day after `run_date`.
pub fn horizon_date(run_date: NaiveDate) -> NaiveDate {
    run_date.succ_opt().unwrap_or(NaiveDate::MAX)
}

/// Model seed for a live run: the run date as `YYYYMMDD`.
pub fn live_model_seed(run_date: NaiveDate) -> u32 {
    let yyyymmdd =
        run_date.year() as i64 * 10_000 + run_date.month() as i64 * 100 + run_date.day() as i64;
    coerce_seed(yyyymmdd as f64)
}

fn assemble(mode: DataMode, run_date: NaiveDate, ranking: Ranking) -> RunResult {
    RunResult {
        schema_version: SCHEMA_VERSION,
        model_version: MODEL_VERSION.to_string(),
        data_mode: mode,
        run_date,
        horizon_date: horizon_date(run_date),
        decision: ranking.decision,
        sector_warning: ranking.sector_warning,
        metrics: ranking.metrics,
        results: ranking.rows,
    }
}

/// Seeded synthetic run. Out-of-range parameters are coerced, never rejected.
pub fn run_synthetic(params: &RunParams, run_date: NaiveDate) -> RunResult {
    let seed = coerce_seed(params.seed);
    let size = coerce_universe_size(params.universe_size);
    info!(seed, size, %run_date, "starting synthetic run");

    let universe = build_universe(seed, size);
    let ranking = rank_universe(&universe.instruments, &universe.required);

    info!(decision = ranking.decision.as_str(), "synthetic run complete");
    assemble(DataMode::Synthetic, run_date, ranking)
}

/// Live run for the required instrument.
///
/// Price and horizon returns come from `provider`; sector and predicted
/// growth come from the model on a stream seeded by the run date. Any
/// failure aborts the run with no partial result.
pub fn run_live(
    provider: &dyn MarketDataProvider,
    run_date: NaiveDate,
    history_window: usize,
) -> Result<RunResult, RunError> {
    info!(provider = provider.name(), symbol = REQUIRED_IDENTIFIER, %run_date, "starting live run");

    let snapshot = fetch_snapshot(provider, REQUIRED_IDENTIFIER, history_window).map_err(|e| {
        warn!(kind = ?e.kind(), error = %e, "live fetch failed");
        e
    })?;
    let returns = horizon_returns(&snapshot.history)?;

    let model = build_required(live_model_seed(run_date));
    let record = InstrumentRecord::new(
        REQUIRED_IDENTIFIER.to_string(),
        REQUIRED_NAME.to_string(),
        model.sector,
        snapshot.latest.price,
        model.predicted_growth_pct,
        returns,
    );

    info!(
        price = snapshot.latest.price,
        as_of = %snapshot.latest.as_of,
        history = snapshot.history.len(),
        "live run complete"
    );
    Ok(assemble(DataMode::Live, run_date, rank_single(&record)))
}

/// Build the HTTP-backed provider from settings. Needs the API key.
pub fn live_provider(
    settings: &ProviderSettings,
) -> Result<AlphaVantageProvider<HttpFetcher>, RunError> {
    let api_key = api_key_from_env(&settings.api_key_env)?;
    let fetcher = HttpFetcher::new(settings.timeout())?;
    Ok(AlphaVantageProvider::new(fetcher, settings.base_url.clone(), api_key))
}

/// Run according to `config`.
pub fn run(config: &RunConfig, run_date: NaiveDate) -> Result<RunResult, RunError> {
    config.validate()?;
    match config.run.mode {
        DataMode::Synthetic => Ok(run_synthetic(&config.run, run_date)),
        DataMode::Live => {
            let provider = live_provider(&config.provider)?;
            run_live(&provider, run_date, config.provider.history_window)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn horizon_is_next_day() {
        assert_eq!(horizon_date(date(2024, 12, 31)), date(2025, 1, 1));
        assert_eq!(horizon_date(date(2024, 2, 28)), date(2024, 2, 29));
    }

    #[test]
    fn live_seed_is_yyyymmdd() {
        assert_eq!(live_model_seed(date(2024, 6, 28)), 20_240_628);
    }

    #[test]
    fn synthetic_run_shape() {
        let result = run_synthetic(&RunParams::default(), date(2024, 6, 28));
        assert_eq!(result.data_mode, DataMode::Synthetic);
        assert_eq!(result.results.len(), 11);
        assert_eq!(result.horizon_date, date(2024, 6, 29));
        assert_eq!(result.model_version, MODEL_VERSION);
    }

    #[test]
    fn synthetic_run_coerces_parameters() {
        let params = RunParams {
            mode: DataMode::Synthetic,
            seed: f64::NAN,
            universe_size: -5.0,
        };
        let coerced = run_synthetic(&params, date(2024, 1, 2));
        let explicit = run_synthetic(
            &RunParams {
                mode: DataMode::Synthetic,
                seed: 0.0,
                universe_size: 1000.0,
            },
            date(2024, 1, 2),
        );
        assert_eq!(coerced, explicit);
    }

    #[test]
    fn live_without_key_is_configuration_error() {
        let mut config = RunConfig::default();
        config.run.mode = DataMode::Live;
        config.provider.api_key_env = "FACTORLAB_RUNNER_TEST_UNSET_KEY".into();
        let err = run(&config, date(2024, 6, 28)).unwrap_err();
        assert_eq!(err.data_kind(), Some(ErrorKind::Configuration));
    }
}
