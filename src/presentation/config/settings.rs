use std::time::Duration;

use config::{Config, File};
use serde::Deserialize;

use crate::application::services::{FailurePolicy, SimulatorConfig};

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub simulator: SimulatorSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    /// Serve from the in-process simulator instead of the real backend.
    pub use_mocks: bool,
    pub base_url: String,
    pub timeout_ms: u64,
    pub mock_latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorSettings {
    pub start_delay_ms: u64,
    pub crawl_delay_ms: u64,
    pub finish_delay_ms: u64,
    pub failure_policy: FailurePolicySetting,
    pub failure_marker: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicySetting {
    Never,
    Always,
    Keyword,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl SimulatorSettings {
    pub fn to_config(&self) -> Result<SimulatorConfig, SettingsError> {
        let failure_policy = match self.failure_policy {
            FailurePolicySetting::Never => FailurePolicy::Never,
            FailurePolicySetting::Always => FailurePolicy::Always,
            FailurePolicySetting::Keyword => match self.failure_marker.as_deref() {
                Some(marker) if !marker.trim().is_empty() => {
                    FailurePolicy::KeywordContains(marker.trim().to_string())
                }
                _ => {
                    return Err(SettingsError::Invalid(
                        "simulator.failure_marker is required when failure_policy = keyword"
                            .to_string(),
                    ));
                }
            },
        };

        Ok(SimulatorConfig {
            start_delay: Duration::from_millis(self.start_delay_ms),
            crawl_delay: Duration::from_millis(self.crawl_delay_ms),
            finish_delay: Duration::from_millis(self.finish_delay_ms),
            failure_policy,
        })
    }
}

impl Settings {
    /// Layers defaults, `appsettings.{environment}.toml` and `APP_*`
    /// environment variables, later sources winning.
    ///
    /// Nested keys use a double underscore: `APP_BACKEND__USE_MOCKS=false`.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let file_name = format!("appsettings.{}", environment.as_str().to_lowercase());
        Self::builder()?
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(SettingsError::from)
    }

    /// Settings made of defaults only.
    pub fn defaults() -> Result<Self, SettingsError> {
        Self::builder()?
            .build()
            .and_then(Config::try_deserialize)
            .map_err(SettingsError::from)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, SettingsError> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("backend.use_mocks", true)?
            .set_default("backend.base_url", "http://localhost:8080")?
            .set_default("backend.timeout_ms", 15_000_i64)?
            .set_default("backend.mock_latency_ms", 0_i64)?
            .set_default("simulator.start_delay_ms", 600_i64)?
            .set_default("simulator.crawl_delay_ms", 1000_i64)?
            .set_default("simulator.finish_delay_ms", 1200_i64)?
            .set_default("simulator.failure_policy", "never")?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid settings: {0}")]
    Invalid(String),
}
