//! Run lifecycle: `Idle → Running → (Success | Error)`.
//!
//! A session holds at most one outcome. An error keeps only its message; no
//! partial result survives a failed run. Re-running a finished session starts
//! over from `Running`.

use chrono::NaiveDate;
use tracing::{error, info};

use crate::config::RunConfig;
use crate::result::RunResult;
use crate::runner::{run, RunError};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Success(Box<RunResult>),
    Error(String),
}

impl RunState {
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Success(_) => "success",
            RunState::Error(_) => "error",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, RunState::Success(_) | RunState::Error(_))
    }
}

#[derive(Debug, Default)]
pub struct RunSession {
    state: RunState,
}

impl RunSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn result(&self) -> Option<&RunResult> {
        match &self.state {
            RunState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RunState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Drive one run to a terminal state.
    pub fn execute<F>(&mut self, job: F) -> &RunState
    where
        F: FnOnce() -> Result<RunResult, RunError>,
    {
        self.state = RunState::Running;
        self.state = match job() {
            Ok(result) => {
                info!(decision = result.decision.as_str(), "run succeeded");
                RunState::Success(Box::new(result))
            }
            Err(e) => {
                error!(error = %e, "run failed");
                RunState::Error(e.to_string())
            }
        };
        &self.state
    }

    /// Run `config` for `run_date`.
    pub fn run(&mut self, config: &RunConfig, run_date: NaiveDate) -> &RunState {
        self.execute(|| run(config, run_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataMode, RunParams};
    use crate::runner::run_synthetic;
    use factorlab_core::data::DataError;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
    }

    #[test]
    fn new_session_is_idle() {
        let session = RunSession::new();
        assert_eq!(session.state(), &RunState::Idle);
        assert!(!session.state().is_finished());
    }

    #[test]
    fn success_carries_result() {
        let mut session = RunSession::new();
        let state = session.execute(|| Ok(run_synthetic(&RunParams::default(), date())));
        assert_eq!(state.label(), "success");
        assert_eq!(session.result().unwrap().results.len(), 11);
        assert!(session.error().is_none());
    }

    #[test]
    fn error_carries_message_only() {
        let mut session = RunSession::new();
        session.execute(|| Err(DataError::Network("connection refused".into()).into()));
        assert_eq!(session.state().label(), "error");
        assert!(session.result().is_none());
        assert!(session.error().unwrap().contains("connection refused"));
    }

    #[test]
    fn finished_session_can_rerun() {
        let mut session = RunSession::new();
        session.execute(|| Err(DataError::Provider("throttled".into()).into()));
        assert!(session.state().is_finished());

        let mut config = RunConfig::default();
        config.run.mode = DataMode::Synthetic;
        session.run(&config, date());
        assert!(session.result().is_some());
    }

    #[test]
    fn session_enters_running_before_job() {
        // A panicking job never reaches a terminal state.
        let mut session = RunSession::new();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            session.execute(|| panic!("boom"));
        }));
        assert!(outcome.is_err());
        assert_eq!(session.state(), &RunState::Running);
    }
}
