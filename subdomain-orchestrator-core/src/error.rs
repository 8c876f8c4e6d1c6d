//! Unified error type definition.

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use subdomain_orchestrator_provider::ProviderError;

/// Core layer error type.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Bad subdomain name or request input. Local, never retried.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Preflight found existing resources; creation aborted with no partial
    /// state to clean.
    #[error("Conflicts detected: {}", .0.join("; "))]
    Conflicts(Vec<String>),

    /// Per-session soft cap hit.
    #[error("Rate limit exceeded for {operation} (retry in {retry_after_secs}s)")]
    RateLimitExceeded {
        operation: String,
        retry_after_secs: u64,
    },

    /// The id/name is absent from the tracking store. Deletion of anything
    /// untracked is refused unconditionally.
    #[error("Subdomain not found: {0}")]
    SubdomainNotFound(String),

    /// The subdomain is already marked deleted.
    #[error("Subdomain already deleted: {0}")]
    AlreadyDeleted(String),

    /// The confirmation name did not exactly match the stored name.
    #[error("Confirmation name does not match")]
    ConfirmationMismatch,

    /// Path-safety breach. Always logged at elevated severity, never
    /// silently downgraded.
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// Storage layer error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// External-system error (converted from the provider library).
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether this is expected behavior (user input, resource absent, soft
    /// caps), used for log classification: `warn` when `true`, `error` when
    /// `false`. **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_)
            | Self::Conflicts(_)
            | Self::RateLimitExceeded { .. }
            | Self::SubdomainNotFound(_)
            | Self::AlreadyDeleted(_)
            | Self::ConfirmationMismatch => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
