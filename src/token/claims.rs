//! Unverified reading of token claims.
//!
//! Claims are read, NOT authenticated. The issuing server is trusted and the
//! signature segment is never checked; only the `exp` claim is consumed.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::helpers::time::from_exp_claim;

/// Claims consumed from the token payload
#[derive(Debug, Deserialize)]
pub struct JwtClaims {
    /// Absent or non-numeric values are rejected in `decode_claims`
    #[serde(default)]
    pub exp: Option<Value>,
}

pub fn decode_claims(token: &str) -> Result<JwtClaims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ClientError::TokenClaim(format!(
            "invalid token format: expected 3 segments, got {}",
            parts.len()
        )));
    }

    let payload = parts[1].trim_end_matches('=');
    let decoded = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| ClientError::TokenClaim(format!("base64 decode error: {}", e)))?;

    serde_json::from_slice::<JwtClaims>(&decoded)
        .map_err(|e| ClientError::TokenClaim(format!("invalid token payload: {}", e)))
}

/// Absolute expiry of `token`. Decodes the token on every call.
pub fn expires_at(token: &str) -> Result<DateTime<Utc>> {
    let claims = decode_claims(token)?;
    let exp = match claims.exp {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| ClientError::TokenClaim(format!("exp claim '{}' is out of range", n)))?,
        Some(other) => {
            return Err(ClientError::TokenClaim(format!(
                "exp claim is not numeric: {}",
                other
            )))
        }
        None => return Err(ClientError::TokenClaim("exp claim is missing".to_owned())),
    };

    from_exp_claim(exp)
        .ok_or_else(|| ClientError::TokenClaim(format!("exp claim {} is not a valid timestamp", exp)))
}

/// A token is expired once `now` reaches its `exp` claim
pub fn is_expired_at(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= expires_at
}
