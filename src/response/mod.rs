//! Page-tagged response shapes and their text rendering.

pub mod assignment;
pub mod decoder;
pub mod occurrence;
pub mod words;

use serde::Deserialize;

pub use assignment::GenericAssignment;
pub use decoder::{RawResponse, ResponseDecoder};
pub use occurrence::WordOccurrence;
pub use words::WordList;

/// Canonical human-readable form of a decoded response
pub trait Render {
    fn render(&self) -> String;
}

/// One decoded response body, selected by its `page` field
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedResponse {
    WordList(WordList),
    WordOccurrence(WordOccurrence),
    GenericAssignment(GenericAssignment),
}

impl DecodedResponse {
    pub fn page(&self) -> &str {
        match self {
            DecodedResponse::WordList(v) => &v.page,
            DecodedResponse::WordOccurrence(v) => &v.page,
            DecodedResponse::GenericAssignment(v) => &v.page,
        }
    }
}

impl Render for DecodedResponse {
    fn render(&self) -> String {
        match self {
            DecodedResponse::WordList(v) => v.render(),
            DecodedResponse::WordOccurrence(v) => v.render(),
            DecodedResponse::GenericAssignment(v) => v.render(),
        }
    }
}

/// What `decode` does with a `page` value it doesn't know
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPagePolicy {
    /// Fail with `ClientError::UnknownPage`
    #[default]
    Reject,
    /// Produce no response and no error
    Ignore,
}
