use anyhow::{anyhow, Result};
use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings::{LogFormat, LoggingConfig};
use crate::config::ClientConfig;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match *self {
            LogLevel::TRACE => "trace",
            LogLevel::DEBUG => "debug",
            LogLevel::INFO => "info",
            LogLevel::WARN => "warn",
            LogLevel::ERROR => "error",
        }
    }
}

/// Resolve the effective logging config: CLI level wins over the file
pub fn resolve(client_config: &ClientConfig, arg_log_level: Option<LogLevel>) -> LoggingConfig {
    let config = client_config.settings.logging.clone().unwrap_or_default();
    match arg_log_level {
        Some(level) => LoggingConfig::new(level.as_str().to_owned(), config.format),
        None => config,
    }
}

pub fn run(client_config: &ClientConfig, arg_log_level: Option<LogLevel>) -> Result<()> {
    init_logging(&resolve(client_config, arg_log_level))
}

/// Initialize tracing with the desired config. Output goes to stderr so
/// stdout only carries rendered responses.
pub fn init_logging(cfg: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&cfg.level)
        .map_err(|e| anyhow!("invalid log level '{}': {}", cfg.level, e))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true)
                .with_ansi(false)
                .with_writer(std::io::stderr);

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true)
                .with_writer(std::io::stderr);

            let _ = registry.with(layer).try_init();
        }
    };
    Ok(())
}
