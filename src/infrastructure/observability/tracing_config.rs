use crate::presentation::config::{Environment, LoggingSettings};

pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Configuration for tracing initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_level: String,
}

impl TracingConfig {
    /// Builds from `logging` settings; `LOG_FORMAT` overrides `enable_json`.
    pub fn from_settings(logging: &LoggingSettings, environment: Environment) -> Self {
        Self {
            environment: environment.to_string(),
            json_format: logging.enable_json,
            default_level: logging.level.clone(),
        }
        .with_log_format(std::env::var(LOG_FORMAT_VAR).ok().as_deref())
    }

    /// `json` switches to JSON output, any other value to plain text.
    pub fn with_log_format(mut self, format: Option<&str>) -> Self {
        if let Some(format) = format.map(str::trim).filter(|f| !f.is_empty()) {
            self.json_format = format.eq_ignore_ascii_case("json");
        }
        self
    }
}
