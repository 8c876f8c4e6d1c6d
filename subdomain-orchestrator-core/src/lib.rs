//! Subdomain Orchestrator Core Library
//!
//! Business logic for the hosted-subdomain lifecycle:
//! - Creation saga (validation, preflight conflict detection, ordered
//!   provisioning across DNS, hosting panel, database, and filesystem)
//! - Deletion saga (confirmation gate, independent per-resource teardown,
//!   partial-failure accounting)
//! - Per-session rate limiting and audit logging
//!
//! Platform-independent: persistence and audit output are abstracted behind
//! traits, provisioning targets behind the provider library's client traits.

pub mod audit;
pub mod error;
pub mod ratelimit;
pub mod services;
pub mod traits;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{AuditSink, ContentGenerator, TrackingStore};
