//! Token lifecycle: reading the expiry claim, deciding between reuse and
//! refresh, and the password login exchange.

pub mod claims;
pub mod credentials;
pub mod manager;

pub use credentials::Credentials;
pub use manager::TokenManager;
