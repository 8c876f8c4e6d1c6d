//! Subdomain deletion orchestration.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::ratelimit::Operation;
use crate::services::ServiceContext;
use crate::types::{
    DeletionOutcome, DeletionRecord, DeletionResult, RequestContext, Subdomain, SubdomainStatus,
};

/// A deletion request: the tracked id plus the exact name typed back by the
/// caller as confirmation.
#[derive(Debug, Clone)]
pub struct DeletionCommand {
    pub subdomain_id: i64,
    pub confirm_name: String,
}

/// Drives the deletion saga.
///
/// Unlike creation, deletion never aborts mid-run: all four resource
/// deletions are attempted independently so one dead system cannot strand
/// the other three resources. The per-resource outcome is persisted
/// atomically with the final status.
pub struct DeprovisionService {
    ctx: Arc<ServiceContext>,
}

impl DeprovisionService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Run the deletion saga.
    ///
    /// Preconditions, checked in order before anything is touched: the
    /// session's deletion window has room, the id is tracked, the subdomain
    /// is not already fully deleted (partial deletions may be retried), and
    /// `confirm_name` equals the stored name exactly, case included.
    pub async fn delete(
        &self,
        command: DeletionCommand,
        caller: &RequestContext,
    ) -> CoreResult<DeletionResult> {
        let audit = &self.ctx.audit;
        let origin = caller.remote_addr.as_str();

        self.ctx
            .rate_limiter
            .check(&caller.session_id, Operation::Deletion)?;

        let subdomain = self
            .ctx
            .tracking
            .find_by_id(command.subdomain_id)
            .await?
            .ok_or_else(|| CoreError::SubdomainNotFound(command.subdomain_id.to_string()))?;

        if subdomain.status == SubdomainStatus::Deleted {
            return Err(CoreError::AlreadyDeleted(subdomain.name));
        }

        if command.confirm_name != subdomain.name {
            audit
                .warning(
                    format!(
                        "Deletion confirmation mismatch for '{}' (got '{}')",
                        subdomain.name, command.confirm_name
                    ),
                    origin,
                )
                .await;
            return Err(CoreError::ConfirmationMismatch);
        }

        audit
            .info(format!("Deleting subdomain: {}", subdomain.name), origin)
            .await;

        // A retry of a partial deletion must not re-delete what an earlier
        // run already removed; those calls could only come back "not found".
        let prior = self.ctx.tracking.latest_deletion(subdomain.id).await?;

        let (outcome, steps) = self.run_saga(&subdomain, prior.as_ref(), caller).await;
        let status = outcome.status();

        // Deletion attempts count against the window whether or not every
        // resource went away.
        self.ctx
            .rate_limiter
            .record(&caller.session_id, Operation::Deletion);

        let result = DeletionResult {
            subdomain_id: subdomain.id,
            subdomain_name: subdomain.name.clone(),
            dns_deleted: outcome.dns_deleted,
            hosting_deleted: outcome.hosting_deleted,
            database_deleted: outcome.database_deleted,
            files_deleted: outcome.files_deleted,
            errors: outcome.errors.clone(),
            status,
            steps,
        };

        self.ctx
            .tracking
            .record_deletion(subdomain.id, outcome, status)
            .await?;

        match status {
            SubdomainStatus::Deleted => {
                audit
                    .success(format!("Deleted subdomain: {}", subdomain.name), origin)
                    .await;
            }
            _ => {
                audit
                    .warning(
                        format!(
                            "Partially deleted subdomain '{}': {}",
                            subdomain.name,
                            result.errors.join("; ")
                        ),
                        origin,
                    )
                    .await;
            }
        }

        Ok(result)
    }

    /// Attempt all four resource deletions, recording each outcome. A
    /// resource the creation run never recorded (no database name, no
    /// directory path), or one a prior partial run already removed, is
    /// skipped and counted as deleted — so retries converge on `Deleted`
    /// instead of failing forever on "not found".
    async fn run_saga(
        &self,
        subdomain: &Subdomain,
        prior: Option<&DeletionRecord>,
        caller: &RequestContext,
    ) -> (DeletionOutcome, Vec<String>) {
        let mut errors = Vec::new();
        let mut steps = Vec::new();

        let dns_deleted = if prior.is_some_and(|p| p.dns_deleted) {
            steps.push(format!(
                "DNS record skipped (removed in earlier run): {}",
                subdomain.full_domain
            ));
            true
        } else {
            match self.ctx.dns.delete_record(&subdomain.full_domain).await {
                Ok(()) => {
                    steps.push(format!("DNS record deleted: {}", subdomain.full_domain));
                    true
                }
                Err(e) => {
                    errors.push(format!("DNS: {e}"));
                    steps.push(format!("DNS record deletion failed: {e}"));
                    false
                }
            }
        };

        let hosting_deleted = if prior.is_some_and(|p| p.hosting_deleted) {
            steps.push(format!(
                "Hosting subdomain skipped (removed in earlier run): {}",
                subdomain.name
            ));
            true
        } else {
            match self
                .ctx
                .hosting
                .delete_subdomain(&subdomain.name, &self.ctx.config.root_domain)
                .await
            {
                Ok(()) => {
                    steps.push(format!("Hosting subdomain deleted: {}", subdomain.name));
                    true
                }
                Err(e) => {
                    errors.push(format!("Hosting: {e}"));
                    steps.push(format!("Hosting subdomain deletion failed: {e}"));
                    false
                }
            }
        };

        let database_deleted = if prior.is_some_and(|p| p.database_deleted) {
            steps.push("Database skipped (removed in earlier run)".to_string());
            true
        } else {
            match &subdomain.database_name {
                Some(db_name) => match self.ctx.hosting.delete_database(db_name).await {
                    Ok(()) => {
                        steps.push(format!("Database deleted: {db_name}"));
                        true
                    }
                    Err(e) => {
                        errors.push(format!("Database: {e}"));
                        steps.push(format!("Database deletion failed: {e}"));
                        false
                    }
                },
                None => {
                    steps.push("Database skipped (none recorded)".to_string());
                    true
                }
            }
        };

        let files_deleted = if prior.is_some_and(|p| p.files_deleted) {
            steps.push("Directory skipped (removed in earlier run)".to_string());
            true
        } else {
            match &subdomain.directory_path {
                Some(path) => {
                    let path = PathBuf::from(path);
                    let guard = self.ctx.config.web_root_guard();
                    match self.ctx.filesystem.delete_tree(&path, &guard).await {
                        Ok(removed) => {
                            steps.push(format!("Directory deleted: {}", removed.display()));
                            true
                        }
                        Err(e) => {
                            if e.is_security_violation() {
                                self.ctx
                                    .audit
                                    .security(
                                        format!(
                                            "Refused to delete directory for '{}': {e}",
                                            subdomain.name
                                        ),
                                        &caller.remote_addr,
                                    )
                                    .await;
                            }
                            errors.push(format!("Directory: {e}"));
                            steps.push(format!("Directory deletion failed: {e}"));
                            false
                        }
                    }
                }
                None => {
                    steps.push("Directory skipped (none recorded)".to_string());
                    true
                }
            }
        };

        let outcome = DeletionOutcome {
            dns_deleted,
            hosting_deleted,
            database_deleted,
            files_deleted,
            errors,
            deleted_by: caller.remote_addr.clone(),
        };
        (outcome, steps)
    }
}
