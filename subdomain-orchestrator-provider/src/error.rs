use serde::{Deserialize, Serialize};

/// Unified error type for all external-system client operations.
///
/// Each variant carries a `provider` field identifying which system produced
/// the error (`"cloudflare"`, `"cpanel"`, `"filesystem"`), plus variant-specific
/// context. All variants are serializable for structured error reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The remote API reported a failure.
    ApiError {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },

    /// The requested DNS record does not exist at the provider.
    RecordNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Full domain of the record that was not found.
        name: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// A filesystem operation failed (I/O error, permission denied, etc.).
    Filesystem {
        /// Path involved in the failed operation.
        path: String,
        /// Error details.
        detail: String,
    },

    /// The directory targeted for deletion does not exist.
    ///
    /// This is a not-found class error, never a security refusal.
    DirectoryNotFound {
        /// Path that was not found.
        path: String,
    },

    /// A destructive filesystem operation violated a path-safety invariant.
    ///
    /// Always logged at elevated severity by the caller; never downgraded.
    SecurityViolation {
        /// Path that triggered the refusal.
        path: String,
        /// Which invariant was violated.
        detail: String,
    },
}

impl ProviderError {
    /// Whether this is expected behavior (bad input, resource absent), used
    /// for log classification: `warn` when `true`, `error` when `false`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::RecordNotFound { .. } | Self::DirectoryNotFound { .. }
        )
    }

    /// Whether this is a path-safety refusal.
    #[must_use]
    pub fn is_security_violation(&self) -> bool {
        matches!(self, Self::SecurityViolation { .. })
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ApiError {
                provider,
                raw_code,
                raw_message,
            } => {
                if let Some(code) = raw_code {
                    write!(f, "[{provider}] API error ({code}): {raw_message}")
                } else {
                    write!(f, "[{provider}] API error: {raw_message}")
                }
            }
            Self::RecordNotFound { provider, name } => {
                write!(f, "[{provider}] Record '{name}' not found")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::Filesystem { path, detail } => {
                write!(f, "[filesystem] {path}: {detail}")
            }
            Self::DirectoryNotFound { path } => {
                write!(f, "[filesystem] Directory does not exist: {path}")
            }
            Self::SecurityViolation { path, detail } => {
                write!(f, "[filesystem] SECURITY: {detail}: {path}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
