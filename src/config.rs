//! Configuration loading and logging bootstrap.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Template written by `oddsflow config init`.
pub const CONFIG_TEMPLATE: &str = r#"# oddsflow configuration

[data]
# Directory holding one subdirectory per event, each containing
# <market_id>_trades.csv and optionally polymarket_prices.csv.
trades_dir = "markets"
# Directory output tables are written to (one subdirectory per event).
output_dir = "output"
# Optional cohort table (user_id, cumulative_total_value_max). When the file
# does not exist, cohorts are derived per market from traded USD volume.
# cohorts_file = "markets/all_users_analysis.csv"

[runtime]
# Worker count for the market pool; 0 means one per available CPU.
jobs = 0

[logging]
level = "info"
format = "pretty"
"#;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub runtime: RuntimeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory with one subdirectory per event.
    pub trades_dir: PathBuf,
    /// Directory output tables are written to.
    pub output_dir: PathBuf,
    /// Explicit cohort table path; defaults to
    /// `<trades_dir>/all_users_analysis.csv`.
    pub cohorts_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Worker count for the market pool; 0 selects one per available CPU.
    pub jobs: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values; called by [`Config::load`] and by `config validate`.
    pub fn validate(&self) -> Result<()> {
        if self.data.trades_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "data.trades_dir",
            }
            .into());
        }
        if self.data.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "data.output_dir",
            }
            .into());
        }
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.level",
                    reason: format!("'{other}' is not a log level"),
                }
                .into())
            }
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.format",
                    reason: format!("'{other}' is not 'pretty' or 'json'"),
                }
                .into())
            }
        }
        Ok(())
    }

    /// Path of the cohort table, explicit or the conventional default.
    #[must_use]
    pub fn cohorts_file(&self) -> PathBuf {
        self.data
            .cohorts_file
            .clone()
            .unwrap_or_else(|| self.data.trades_dir.join("all_users_analysis.csv"))
    }

    /// Effective worker count after resolving the auto setting.
    #[must_use]
    pub fn jobs(&self) -> usize {
        if self.runtime.jobs == 0 {
            num_cpus::get()
        } else {
            self.runtime.jobs
        }
    }

    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            trades_dir: PathBuf::from("markets"),
            output_dir: PathBuf::from("output"),
            cohorts_file: None,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { jobs: 0 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
