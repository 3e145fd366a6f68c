use std::path::Path;

use anyhow::{anyhow, Result};

use crate::config::proc_loader::{file_to_config, parse_config};
use crate::config::ClientConfig;

/// Load the client config, or defaults when no path is given
pub fn run(config_path: Option<&str>) -> Result<ClientConfig> {
    match config_path {
        Some(path) => file_to_config(Path::new(path))
            .map_err(|e| anyhow!("Invalid config '{}': {}", path, e)),
        None => parse_config(""),
    }
}
