//! Shared constants and invariants

/// Login endpoint path, always appended to the base URL's origin
pub const LOGIN_PATH: &str = "/login";

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Characters of a token shown in debug logs
pub const TOKEN_LOG_PREFIX_LEN: usize = 8;

// Known page discriminators
pub const PAGE_WORDS: &str = "words";
pub const PAGE_OCCURRENCE: &str = "occurrence";
pub const PAGE_ASSIGNMENT1: &str = "assignment1";
