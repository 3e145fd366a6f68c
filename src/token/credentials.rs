use std::fmt;

use serde::Serialize;

const REDACTED: &str = "***";

/// Password exchanged for a bearer token.
///
/// Serializes to the login body `{"password": "..."}`. `Debug` never shows
/// the password.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    password: String,
}

impl Credentials {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &REDACTED)
            .finish()
    }
}
