//! Shared types for external-system clients.

use serde::{Deserialize, Serialize};

/// A DNS record as reported by the DNS provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned record id.
    pub id: String,
    /// Full record name (e.g. `art.example.com`).
    pub name: String,
    /// Record type string as reported by the provider (e.g. `CNAME`).
    pub record_type: String,
    /// Record target/content.
    pub content: String,
    /// Whether the record is proxied (Cloudflare-specific; `None` elsewhere).
    pub proxied: Option<bool>,
}

/// Guard configuration for destructive filesystem operations.
///
/// Both fields are canonicalized lazily at deletion time; see
/// [`crate::fs::safe_remove_tree`] for the invariants they back.
#[derive(Debug, Clone)]
pub struct WebRootGuard {
    /// Web root every deletable path must live strictly beneath.
    pub web_root: std::path::PathBuf,
    /// Domain suffix every deletable path must contain (e.g. `example.com`).
    pub domain_suffix: String,
}

impl WebRootGuard {
    #[must_use]
    pub fn new(web_root: impl Into<std::path::PathBuf>, domain_suffix: impl Into<String>) -> Self {
        Self {
            web_root: web_root.into(),
            domain_suffix: domain_suffix.into(),
        }
    }
}
