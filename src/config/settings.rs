use serde::Deserialize;

use crate::response::UnknownPagePolicy;
use crate::utils::constants::{DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_LOG_LEVEL};

/// ================================
/// Full client configuration
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub decoder: DecoderConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// ================================
/// Transport
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// whole-request timeout applied to the injected client
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DecoderConfig {
    #[serde(default)]
    pub unknown_page: UnknownPagePolicy,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MetricsConfig {
    #[serde(default)]
    pub is_enabled: bool,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // allowed: trace, debug, info, warn, error or an EnvFilter directive
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(default_log_level(), LogFormat::Compact)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_owned()
}
