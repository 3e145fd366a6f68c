//! # Login Request Library
//!
//! Logs in against an HTTP API with a password, keeps reusing the returned
//! bearer token until its `exp` claim passes, and decodes authenticated
//! responses into one of several shapes picked by their `page` field.
//!
//! Modules:
//! - `token` — claim reading, reuse/refresh decision, login exchange
//! - `response` — authenticated fetch, page-tagged decoding and rendering
//! - `config` — optional YAML configuration
//! - `error` — error kinds returned by every operation

pub mod config;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod response;
pub mod runner;
pub mod token;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::error::{ClientError, RequestError, Result};
pub use crate::response::{DecodedResponse, Render, ResponseDecoder, UnknownPagePolicy};
pub use crate::token::{Credentials, TokenManager};
