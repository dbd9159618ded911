//! # Support System API
//!
//! A small multi-tenant REST backend: user accounts, public profiles and
//! support tickets backed by a SQLite document store.
//!
//! ## Features
//!
//! - **Identity management**: signup with atomically allocated `USER######`
//!   public identifiers, argon2-hashed credentials and duplicate-safe email
//!   uniqueness enforced by the store
//! - **Profiles**: lazily created, merged field-by-field from partial
//!   payloads with a derived completeness score and a public/private flag
//! - **Validation**: declarative per-field rules that collect every violation
//!   of a request before anything is persisted
//! - **Support tickets**: append-only requests linked to an identity
//! - **OpenAPI documentation**: auto-generated API documentation

pub mod api;
pub mod completeness;
pub mod config;
pub mod credentials;
pub mod error;
pub mod merge;
pub mod persistence;
pub mod server;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use server::Server;

/// Version of the support-api crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix of every public user identifier
pub const PUBLIC_ID_PREFIX: &str = "USER";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(PUBLIC_ID_PREFIX, "USER");
    }
}
