use std::sync::Arc;

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, info, info_span, Instrument, Span};

use crate::error::{ClientError, RequestError, Result};
use crate::helpers::time::{get_instant, now_utc};
use crate::helpers::url::parse_http_url;
use crate::observability::metrics::Metrics;
use crate::token::claims;
use crate::token::credentials::Credentials;
use crate::utils::constants::{LOGIN_PATH, TOKEN_LOG_PREFIX_LEN};

/// Body of a successful login exchange
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Decides whether a held token can be reused and performs the login
/// exchange when it can't.
///
/// The manager holds no token. Callers keep the string returned by
/// [`TokenManager::ensure_token`] and pass it back on the next call.
#[derive(Debug, Clone)]
pub struct TokenManager {
    client: Client,
    base_url: String,
    credentials: Credentials,
    span: Span,
    metrics: Option<Arc<Metrics>>,
}

impl TokenManager {
    pub fn new(client: Client, base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            credentials,
            span: info_span!("token_manager"),
            metrics: None,
        }
    }

    /// Logging context every operation of this manager runs in
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Return a token that is valid right now.
    ///
    /// * empty `current` → login
    /// * `current` past its `exp` claim → login
    /// * otherwise `current` is returned unchanged without any network call
    ///
    /// A token whose claims can't be read fails the call; it is not replaced
    /// by a fresh login.
    pub async fn ensure_token(&self, current: &str) -> Result<String> {
        if current.is_empty() {
            self.record_check("empty");
            self.span.in_scope(|| info!("no token held, logging in"));
            return self.login().await;
        }

        let expires_at = claims::expires_at(current).inspect_err(|e| {
            self.record_check("unreadable");
            self.span
                .in_scope(|| debug!(error = %e, "held token is unreadable"));
        })?;

        if claims::is_expired_at(expires_at, now_utc()) {
            self.record_check("expired");
            self.span.in_scope(|| info!(%expires_at, "token expired, refreshing"));
            self.login().await
        } else {
            self.record_check("reused");
            self.span.in_scope(|| info!(%expires_at, "token still valid, reusing"));
            Ok(current.to_owned())
        }
    }

    /// Exchange the password for a new token at `{scheme}://{host}/login`.
    ///
    /// Path and query of the base URL are dropped for this call.
    pub async fn login(&self) -> Result<String> {
        let span = self.span.clone();
        async move {
            let endpoint = login_endpoint(&self.base_url)?;
            if let Some(m) = &self.metrics {
                m.login_requests.inc();
            }
            let start = get_instant();
            let result = self.exchange(endpoint).await;
            if let Some(m) = &self.metrics {
                m.request_duration
                    .with_label_values(&["login"])
                    .observe(start.elapsed().as_secs_f64());
                if let Err(e) = &result {
                    m.login_failures.with_label_values(&[e.kind()]).inc();
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn exchange(&self, endpoint: Url) -> Result<String> {
        debug!(%endpoint, "sending login request");
        let response = self
            .client
            .post(endpoint)
            .json(&self.credentials)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: LoginResponse = serde_json::from_str(&body).map_err(|e| {
            RequestError::new(
                status.as_u16(),
                body.as_str(),
                format!("unmarshalling token JSON error: {}", e),
            )
        })?;

        debug!(token = %token_preview(&parsed.token), "login succeeded");
        Ok(parsed.token)
    }

    fn record_check(&self, outcome: &str) {
        if let Some(m) = &self.metrics {
            m.token_checks.with_label_values(&[outcome]).inc();
        }
    }
}

/// Build the login URL from the origin of `base_url`
pub fn login_endpoint(base_url: &str) -> Result<Url> {
    let parsed = parse_http_url(base_url)?;
    let origin = parsed.origin().ascii_serialization();
    Url::parse(&format!("{}{}", origin, LOGIN_PATH)).map_err(|e| ClientError::invalid_url(base_url, e))
}

/// First few characters of a token, enough to tell tokens apart in logs
pub(crate) fn token_preview(token: &str) -> String {
    let prefix: String = token.chars().take(TOKEN_LOG_PREFIX_LEN).collect();
    if prefix.len() < token.len() {
        format!("{}...", prefix)
    } else {
        prefix
    }
}
