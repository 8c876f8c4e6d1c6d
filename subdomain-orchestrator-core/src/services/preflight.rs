//! Pre-creation conflict detection across all managed systems.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::SubdomainStatus;

/// Probes every system a creation run would touch and refuses when any
/// already holds the resource.
///
/// This is a hard gate: one or more conflicts means the creation run makes
/// zero mutating calls. The provider probes are best-effort: a probe that
/// itself fails is logged and treated as "no conflict", never as a reason
/// to abort, so one unreachable system cannot block creation on the rest.
pub struct PreflightValidator {
    ctx: Arc<ServiceContext>,
}

impl PreflightValidator {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Check all five systems for an existing `name`. All probes run even
    /// after the first hit, so the caller sees the full conflict list.
    pub async fn check(&self, name: &str) -> CoreResult<()> {
        let full_domain = self.ctx.config.full_domain(name);
        let database_name = self.ctx.config.database_name(name);
        let directory = self.ctx.config.directory_path(name);
        let mut conflicts = Vec::new();

        // The registry keeps deleted rows, and names are unique across all of
        // them, so any tracked row blocks the name. Unlike the provider
        // probes, a tracking-store failure is fatal: the store is the source
        // of truth and cannot be skipped.
        if let Some(existing) = self.ctx.tracking.find_by_name(name).await? {
            let qualifier = if existing.status == SubdomainStatus::Active {
                ""
            } else {
                " (previously deleted)"
            };
            conflicts.push(format!("Subdomain already tracked{qualifier}: {name}"));
        }

        match self.ctx.hosting.subdomain_exists(&full_domain).await {
            Ok(true) => {
                conflicts.push(format!("Hosting subdomain already exists: {full_domain}"));
            }
            Ok(false) => {}
            Err(e) => log::warn!("Preflight hosting probe failed for {full_domain}: {e}"),
        }

        match self.ctx.dns.find_record(&full_domain).await {
            Ok(Some(_)) => {
                conflicts.push(format!("DNS record already exists: {full_domain}"));
            }
            Ok(None) => {}
            Err(e) => log::warn!("Preflight DNS probe failed for {full_domain}: {e}"),
        }

        match self.ctx.hosting.database_exists(&database_name).await {
            Ok(true) => {
                conflicts.push(format!("Database already exists: {database_name}"));
            }
            Ok(false) => {}
            Err(e) => log::warn!("Preflight database probe failed for {database_name}: {e}"),
        }

        if self.ctx.filesystem.directory_exists(&directory).await {
            conflicts.push(format!(
                "Directory already exists: {}",
                directory.display()
            ));
        }

        if conflicts.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Conflicts(conflicts))
        }
    }
}
