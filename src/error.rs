//! Error kinds surfaced by the login and fetch flows.
//!
//! Nothing in this crate swallows an error: every failure is returned to the
//! immediate caller of the operation that produced it.

use thiserror::Error;

/// A response body that could not be decoded into the expected JSON shape.
///
/// Keeps the status and the raw body so a caller can show what the server
/// actually sent (for example an HTML error page instead of JSON).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{cause}\nResponse code: {http_status}\nResponse body: {body}\n")]
pub struct RequestError {
    pub http_status: u16,
    pub body: String,
    pub cause: String,
}

impl RequestError {
    pub fn new(http_status: u16, body: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            http_status,
            body: body.into(),
            cause: cause.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// The URL is not an absolute http(s) URL with a host
    #[error("URL '{url}' is not valid: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection, timeout or body read failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a status the operation does not accept
    #[error("unexpected HTTP status code {status}")]
    Status { status: u16 },

    #[error(transparent)]
    Decode(#[from] RequestError),

    /// Token is malformed or carries no usable `exp` claim
    #[error("token claims could not be read: {0}")]
    TokenClaim(String),

    /// `page` discriminator matched none of the known shapes
    #[error("unrecognized page discriminator '{0}'")]
    UnknownPage(String),
}

impl ClientError {
    pub fn invalid_url(url: &str, reason: impl ToString) -> Self {
        ClientError::InvalidUrl {
            url: url.to_owned(),
            reason: reason.to_string(),
        }
    }

    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::InvalidUrl { .. } => "invalid_url",
            ClientError::Transport(_) => "transport",
            ClientError::Status { .. } => "status",
            ClientError::Decode(_) => "decode",
            ClientError::TokenClaim(_) => "token_claim",
            ClientError::UnknownPage(_) => "unknown_page",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
