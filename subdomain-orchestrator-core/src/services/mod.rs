//! Lifecycle service layer.

mod deprovision;
mod preflight;
mod provision;
mod subdomain_service;

pub use deprovision::{DeletionCommand, DeprovisionService};
pub use preflight::PreflightValidator;
pub use provision::ProvisionService;
pub use subdomain_service::SubdomainService;

use std::sync::Arc;

use subdomain_orchestrator_provider::{DnsClient, FilesystemClient, HostingClient};

use crate::audit::AuditLogger;
use crate::ratelimit::RateLimiter;
use crate::traits::{ContentGenerator, TrackingStore};
use crate::types::OrchestratorConfig;

/// Service context holding every dependency the lifecycle services need.
///
/// The platform layer builds this once and injects its storage, audit, and
/// client implementations.
pub struct ServiceContext {
    pub dns: Arc<dyn DnsClient>,
    pub hosting: Arc<dyn HostingClient>,
    pub filesystem: Arc<dyn FilesystemClient>,
    pub tracking: Arc<dyn TrackingStore>,
    pub audit: AuditLogger,
    /// Optional content generation; `None` always uses fallback content.
    pub content: Option<Arc<dyn ContentGenerator>>,
    pub rate_limiter: RateLimiter,
    pub config: OrchestratorConfig,
}
