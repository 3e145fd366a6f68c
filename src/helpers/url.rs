use reqwest::Url;

use crate::error::{ClientError, Result};

/// Parse `raw` as an absolute http(s) URL with a host
pub fn parse_http_url(raw: &str) -> Result<Url> {
    let parsed = Url::parse(raw).map_err(|e| ClientError::invalid_url(raw, e))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ClientError::invalid_url(
                raw,
                format!("unsupported scheme '{}'", other),
            ))
        }
    }
    if parsed.host_str().is_none() {
        return Err(ClientError::invalid_url(raw, "missing host"));
    }
    Ok(parsed)
}
