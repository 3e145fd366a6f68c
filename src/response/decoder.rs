use std::sync::Arc;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument, Span};

use crate::error::{ClientError, RequestError, Result};
use crate::helpers::time::get_instant;
use crate::helpers::url::parse_http_url;
use crate::observability::metrics::Metrics;
use crate::response::{
    DecodedResponse, GenericAssignment, UnknownPagePolicy, WordList, WordOccurrence,
};
use crate::utils::constants::{PAGE_ASSIGNMENT1, PAGE_OCCURRENCE, PAGE_WORDS};

/// Status and body of a successful fetch, kept together so decode failures
/// can report both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PageProbe {
    /// missing and `null` both read as an empty page
    #[serde(default)]
    page: Option<String>,
}

/// Fetches authenticated resources and decodes them by their `page` field
#[derive(Debug, Clone)]
pub struct ResponseDecoder {
    client: Client,
    unknown_page: UnknownPagePolicy,
    span: Span,
    metrics: Option<Arc<Metrics>>,
}

impl ResponseDecoder {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            unknown_page: UnknownPagePolicy::default(),
            span: info_span!("response_decoder"),
            metrics: None,
        }
    }

    pub fn with_unknown_page(mut self, policy: UnknownPagePolicy) -> Self {
        self.unknown_page = policy;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// GET `url` with `Authorization: Bearer <token>`.
    ///
    /// Non-2xx answers fail with `ClientError::Status`. No retry.
    pub async fn fetch(&self, url: &str, token: &str) -> Result<RawResponse> {
        let span = self.span.clone();
        async move {
            let parsed = parse_http_url(url)?;
            if let Some(m) = &self.metrics {
                m.fetch_requests.inc();
            }

            let start = get_instant();
            let result = self.send(parsed, token).await;
            if let Some(m) = &self.metrics {
                m.request_duration
                    .with_label_values(&["fetch"])
                    .observe(start.elapsed().as_secs_f64());
            }
            self.record_failure(&result);
            result
        }
        .instrument(span)
        .await
    }

    async fn send(&self, url: Url, token: &str) -> Result<RawResponse> {
        debug!(%url, "sending authenticated request");
        let response = self.client.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        Ok(RawResponse::new(status.as_u16(), body))
    }

    /// Decode `raw` into the shape named by its `page` field.
    ///
    /// `Ok(None)` only happens for an unknown page under
    /// `UnknownPagePolicy::Ignore` and means there is nothing to render.
    pub fn decode(&self, raw: &RawResponse) -> Result<Option<DecodedResponse>> {
        let result = self.span.in_scope(|| decode_with_policy(raw, self.unknown_page));
        match &result {
            Ok(Some(decoded)) => {
                if let Some(m) = &self.metrics {
                    m.decoded_pages.with_label_values(&[decoded.page()]).inc();
                }
            }
            Ok(None) => {}
            Err(_) => self.record_failure(&result),
        }
        result
    }

    pub async fn fetch_and_decode(&self, url: &str, token: &str) -> Result<Option<DecodedResponse>> {
        let raw = self.fetch(url, token).await?;
        self.decode(&raw)
    }

    fn record_failure<T>(&self, result: &Result<T>) {
        if let (Some(m), Err(e)) = (&self.metrics, result) {
            m.fetch_failures.with_label_values(&[e.kind()]).inc();
        }
    }
}

pub fn decode_with_policy(
    raw: &RawResponse,
    unknown_page: UnknownPagePolicy,
) -> Result<Option<DecodedResponse>> {
    let value: Value = serde_json::from_str(&raw.body).map_err(|e| {
        RequestError::new(
            raw.status,
            raw.body.as_str(),
            format!("unmarshalling Page JSON error: {}", e),
        )
    })?;
    let probe: PageProbe = serde_json::from_value(value.clone()).map_err(|e| {
        RequestError::new(
            raw.status,
            raw.body.as_str(),
            format!("unmarshalling Page JSON error: {}", e),
        )
    })?;

    let page = probe.page.unwrap_or_default();
    let decoded = match page.as_str() {
        PAGE_WORDS => DecodedResponse::WordList(decode_shape::<WordList>(raw, value, "Words")?),
        PAGE_OCCURRENCE => DecodedResponse::WordOccurrence(decode_shape::<WordOccurrence>(
            raw,
            value,
            "Occurrence",
        )?),
        PAGE_ASSIGNMENT1 => DecodedResponse::GenericAssignment(decode_shape::<GenericAssignment>(
            raw,
            value,
            "Assignment",
        )?),
        unknown => {
            return match unknown_page {
                UnknownPagePolicy::Reject => Err(ClientError::UnknownPage(unknown.to_owned())),
                UnknownPagePolicy::Ignore => {
                    warn!(page = unknown, "unrecognized page, nothing to decode");
                    Ok(None)
                }
            }
        }
    };

    debug!(page = decoded.page(), "response decoded");
    Ok(Some(decoded))
}

fn decode_shape<T: DeserializeOwned>(raw: &RawResponse, value: Value, shape: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        RequestError::new(
            raw.status,
            raw.body.as_str(),
            format!("unmarshalling {} JSON error: {}", shape, e),
        )
        .into()
    })
}
