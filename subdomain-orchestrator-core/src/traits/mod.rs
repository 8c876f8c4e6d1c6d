//! Seams the core orchestrators depend on.
//!
//! Provider-side client traits ([`DnsClient`], [`HostingClient`],
//! [`FilesystemClient`]) live in the provider library; this module defines
//! the application-side seams: persistence, audit output, and optional
//! content generation.

use async_trait::async_trait;

use crate::audit::AuditEntry;
use crate::error::CoreResult;
use crate::types::{
    CreationLogEntry, CreationRequest, DeletionOutcome, DeletionRecord, GeneratedContent,
    NewSubdomain, StatusFilter, Subdomain, SubdomainStatus,
};

/// Persistence for the subdomain registry, creation log, and deletion
/// records.
///
/// The registry is the single source of truth for what this system manages:
/// orchestrators refuse to touch anything not recorded here. Rows are never
/// physically removed; deletion flips `status`.
#[async_trait]
pub trait TrackingStore: Send + Sync {
    /// Insert a new `active` row, returning the assigned id.
    ///
    /// `name` carries a uniqueness constraint; a duplicate insert is a
    /// storage error.
    async fn insert(&self, subdomain: NewSubdomain) -> CoreResult<i64>;

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Subdomain>>;

    async fn find_by_name(&self, name: &str) -> CoreResult<Option<Subdomain>>;

    /// Newest-first page of rows matching the filter.
    async fn list(&self, filter: StatusFilter, limit: u64, offset: u64)
        -> CoreResult<Vec<Subdomain>>;

    async fn count(&self, filter: StatusFilter) -> CoreResult<u64>;

    /// Append one creation-log row for the subdomain.
    async fn append_creation_log(&self, subdomain_id: i64, entry: CreationLogEntry)
        -> CoreResult<()>;

    /// Creation-log rows for the subdomain, in insertion order.
    async fn creation_logs(&self, subdomain_id: i64) -> CoreResult<Vec<CreationLogEntry>>;

    /// Persist a deletion run: append the deletion record and update the
    /// subdomain's status to `new_status` in one transaction. Either both
    /// writes land or neither does.
    async fn record_deletion(
        &self,
        subdomain_id: i64,
        outcome: DeletionOutcome,
        new_status: SubdomainStatus,
    ) -> CoreResult<()>;

    /// Most recent deletion record for the subdomain, if any.
    async fn latest_deletion(&self, subdomain_id: i64) -> CoreResult<Option<DeletionRecord>>;
}

/// Destination for audit entries (file, database, collector).
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn write(&self, entry: &AuditEntry) -> CoreResult<()>;
}

/// Optional site-content generation for new subdomains.
///
/// Failure here never fails a creation run; the orchestrator falls back to
/// [`GeneratedContent::fallback`].
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &CreationRequest) -> CoreResult<GeneratedContent>;
}

/// Generator that always yields the deterministic fallback content.
pub struct NoopContentGenerator;

#[async_trait]
impl ContentGenerator for NoopContentGenerator {
    async fn generate(&self, request: &CreationRequest) -> CoreResult<GeneratedContent> {
        Ok(GeneratedContent::fallback(request))
    }
}
