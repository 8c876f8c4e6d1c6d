//! Platform-agnostic application bootstrap for Subdomain Orchestrator.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! injection), plus the bundled adapters: the SQLite tracking store and the
//! file-backed audit sink.

pub mod adapters;

use std::sync::Arc;

use subdomain_orchestrator_core::audit::AuditLogger;
use subdomain_orchestrator_core::error::{CoreError, CoreResult};
use subdomain_orchestrator_core::ratelimit::RateLimiter;
use subdomain_orchestrator_core::services::{
    DeprovisionService, ProvisionService, ServiceContext, SubdomainService,
};
use subdomain_orchestrator_core::traits::{AuditSink, ContentGenerator, TrackingStore};
use subdomain_orchestrator_core::types::OrchestratorConfig;
use subdomain_orchestrator_provider::{DnsClient, FilesystemClient, HostingClient};

/// Platform-agnostic application state.
///
/// Holds all lifecycle services and the `ServiceContext`. Every frontend
/// constructs this once at startup via [`AppStateBuilder`].
pub struct AppState {
    /// Service context (holds all adapters)
    pub ctx: Arc<ServiceContext>,
    /// Creation saga
    pub provision_service: ProvisionService,
    /// Deletion saga
    pub deprovision_service: DeprovisionService,
    /// Read-side queries
    pub subdomain_service: SubdomainService,
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `dns_client` — DNS record management
/// - `hosting_client` — hosting panel subdomains and databases
/// - `filesystem_client` — document tree management
/// - `tracking_store` — subdomain registry persistence
/// - `audit_sink` — audit trail destination
/// - `config` — root domain, paths, naming
///
/// # Optional
/// - `content_generator` — defaults to fallback content only
/// - `rate_limiter` — defaults to the standard per-session limits
pub struct AppStateBuilder {
    dns_client: Option<Arc<dyn DnsClient>>,
    hosting_client: Option<Arc<dyn HostingClient>>,
    filesystem_client: Option<Arc<dyn FilesystemClient>>,
    tracking_store: Option<Arc<dyn TrackingStore>>,
    audit_sink: Option<Arc<dyn AuditSink>>,
    content_generator: Option<Arc<dyn ContentGenerator>>,
    rate_limiter: Option<RateLimiter>,
    config: Option<OrchestratorConfig>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dns_client: None,
            hosting_client: None,
            filesystem_client: None,
            tracking_store: None,
            audit_sink: None,
            content_generator: None,
            rate_limiter: None,
            config: None,
        }
    }

    #[must_use]
    pub fn dns_client(mut self, client: Arc<dyn DnsClient>) -> Self {
        self.dns_client = Some(client);
        self
    }

    #[must_use]
    pub fn hosting_client(mut self, client: Arc<dyn HostingClient>) -> Self {
        self.hosting_client = Some(client);
        self
    }

    #[must_use]
    pub fn filesystem_client(mut self, client: Arc<dyn FilesystemClient>) -> Self {
        self.filesystem_client = Some(client);
        self
    }

    #[must_use]
    pub fn tracking_store(mut self, store: Arc<dyn TrackingStore>) -> Self {
        self.tracking_store = Some(store);
        self
    }

    #[must_use]
    pub fn audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit_sink = Some(sink);
        self
    }

    #[must_use]
    pub fn content_generator(mut self, generator: Arc<dyn ContentGenerator>) -> Self {
        self.content_generator = Some(generator);
        self
    }

    #[must_use]
    pub fn rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    #[must_use]
    pub fn config(mut self, config: OrchestratorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let dns = self
            .dns_client
            .ok_or_else(|| CoreError::ValidationError("dns_client is required".to_string()))?;
        let hosting = self
            .hosting_client
            .ok_or_else(|| CoreError::ValidationError("hosting_client is required".to_string()))?;
        let filesystem = self.filesystem_client.ok_or_else(|| {
            CoreError::ValidationError("filesystem_client is required".to_string())
        })?;
        let tracking = self
            .tracking_store
            .ok_or_else(|| CoreError::ValidationError("tracking_store is required".to_string()))?;
        let audit_sink = self
            .audit_sink
            .ok_or_else(|| CoreError::ValidationError("audit_sink is required".to_string()))?;
        let config = self
            .config
            .ok_or_else(|| CoreError::ValidationError("config is required".to_string()))?;

        let ctx = Arc::new(ServiceContext {
            dns,
            hosting,
            filesystem,
            tracking,
            audit: AuditLogger::new(audit_sink),
            content: self.content_generator,
            rate_limiter: self.rate_limiter.unwrap_or_default(),
            config,
        });

        Ok(AppState {
            provision_service: ProvisionService::new(Arc::clone(&ctx)),
            deprovision_service: DeprovisionService::new(Arc::clone(&ctx)),
            subdomain_service: SubdomainService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
