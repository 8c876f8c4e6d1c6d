//! # subdomain-orchestrator-provider
//!
//! Clients for the four external systems a hosted subdomain spans:
//!
//! | System | Trait | Implementation | Feature Flag |
//! |--------|-------|----------------|--------------|
//! | DNS | [`DnsClient`] | [`CloudflareDns`] (Bearer token) | `cloudflare` |
//! | Hosting panel + databases | [`HostingClient`] | [`CpanelHost`] (UAPI token) | `cpanel` |
//! | Filesystem | [`FilesystemClient`] | [`LocalFilesystem`] | always |
//!
//! All HTTP calls are bounded by fixed connect/request timeouts and are never
//! retried automatically. Destructive filesystem operations go through
//! [`safe_remove_tree`], which enforces the web-root path-safety invariants
//! before touching anything.
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError). Path
//! safety refusals surface as [`ProviderError::SecurityViolation`] and must be
//! audited at elevated severity by callers, never downgraded.

mod error;
pub mod fs;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};
pub use fs::{safe_remove_tree, LocalFilesystem};
pub use http_client::create_http_client;
pub use traits::{DnsClient, FilesystemClient, HostingClient};
pub use types::{DnsRecord, WebRootGuard};

#[cfg(feature = "cloudflare")]
pub use providers::CloudflareDns;

#[cfg(feature = "cpanel")]
pub use providers::CpanelHost;
