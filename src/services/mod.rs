//! Service layer
//!
//! Flows composing the stores, the merge engine and the credential
//! verifier. Handlers validate payloads before calling in here; services
//! enforce existence preconditions and own the persistence ordering.

pub mod identity;
pub mod profile;
pub mod support;

pub use identity::IdentityService;
pub use profile::ProfileService;
pub use support::SupportService;
