use std::{fs, path::Path};

use anyhow::{bail, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::{ClientConfig, LoggingConfig};

/// Load config from a YAML file, expanding `${VAR}` / `${VAR:default}` first
pub fn file_to_config(path: &Path) -> Result<ClientConfig> {
    let content = fs::read_to_string(path)?;

    let expanded = expand_env_vars(&content)?;
    parse_config(&expanded)
}

pub fn parse_config(content: &str) -> Result<ClientConfig> {
    let mut client_config: ClientConfig = if content.trim().is_empty() {
        ClientConfig::default()
    } else {
        serde_yaml::from_str(content).inspect_err(|e| {
            error!("parse config error: {}", e);
        })?
    };

    // Apply defaults
    if client_config.settings.logging.is_none() {
        client_config.settings.logging = Some(LoggingConfig::default());
    }
    debug!("validation config ...");
    validate(&client_config)?;

    Ok(client_config)
}

fn validate(config: &ClientConfig) -> Result<()> {
    if config.settings.http.timeout_ms == 0 {
        bail!("settings.http.timeout_ms must be greater than 0");
    }
    Ok(())
}

fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    Ok(re
        .replace_all(input, |caps: &regex::Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string())
}
