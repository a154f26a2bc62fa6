//! Run configuration: parameters for one run plus provider settings.
//!
//! Loaded from TOML; every field has a default so an empty file is a valid
//! synthetic run.
//!
//! ```toml
//! [run]
//! mode = "LIVE"
//! seed = 12345
//! universe_size = 1000
//!
//! [provider]
//! base_url = "https://www.alphavantage.co/query"
//! api_key_env = "ALPHAVANTAGE_API_KEY"
//! timeout_secs = 30
//! history_window = 253
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use factorlab_core::data::alpha_vantage::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL};
use factorlab_core::data::HISTORY_WINDOW;

/// Errors loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Where instrument data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataMode {
    #[default]
    Synthetic,
    Live,
}

impl DataMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DataMode::Synthetic => "SYNTHETIC",
            DataMode::Live => "LIVE",
        }
    }
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SYNTHETIC" => Ok(DataMode::Synthetic),
            "LIVE" => Ok(DataMode::Live),
            other => Err(ConfigError::Invalid(format!(
                "unknown data mode '{other}' (expected SYNTHETIC or LIVE)"
            ))),
        }
    }
}

/// Parameters of one run.
///
/// `seed` and `universe_size` are kept as requested; the runner coerces them
/// (32-bit wrap for the seed, floor and clamp for the size).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    pub mode: DataMode,
    pub seed: f64,
    pub universe_size: f64,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            mode: DataMode::Synthetic,
            seed: 12345.0,
            universe_size: 1000.0,
        }
    }
}

/// Live-mode provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub history_window: usize,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 30,
            history_window: HISTORY_WINDOW,
        }
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub run: RunParams,
    pub provider: ProviderSettings,
}

impl RunConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Provider settings that cannot produce a meaningful live run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::Invalid("provider.timeout_secs must be > 0".into()));
        }
        if self.provider.history_window < HISTORY_WINDOW {
            return Err(ConfigError::Invalid(format!(
                "provider.history_window must be at least {HISTORY_WINDOW}, got {}",
                self.provider.history_window
            )));
        }
        if self.provider.api_key_env.trim().is_empty() {
            return Err(ConfigError::Invalid("provider.api_key_env is empty".into()));
        }
        Ok(())
    }
}
