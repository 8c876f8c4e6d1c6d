//! Read-side queries over the tracking store.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    DeletionPreview, StatusFilter, Subdomain, SubdomainHistory, SubdomainPage, SubdomainStatus,
};

/// Query service for tracked subdomains.
pub struct SubdomainService {
    ctx: Arc<ServiceContext>,
}

impl SubdomainService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// One page of tracked subdomains, newest first.
    pub async fn list(
        &self,
        filter: StatusFilter,
        limit: u64,
        offset: u64,
    ) -> CoreResult<SubdomainPage> {
        let items = self.ctx.tracking.list(filter, limit, offset).await?;
        let total = self.ctx.tracking.count(filter).await?;
        Ok(SubdomainPage {
            items,
            total,
            limit,
            offset,
        })
    }

    pub async fn get(&self, id: i64) -> CoreResult<Subdomain> {
        self.ctx
            .tracking
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::SubdomainNotFound(id.to_string()))
    }

    pub async fn get_by_name(&self, name: &str) -> CoreResult<Subdomain> {
        self.ctx
            .tracking
            .find_by_name(name)
            .await?
            .ok_or_else(|| CoreError::SubdomainNotFound(name.to_string()))
    }

    /// Creation log plus the most recent deletion record, if any.
    pub async fn history(&self, id: i64) -> CoreResult<SubdomainHistory> {
        // Resolve first so an untracked id reads as not-found rather than an
        // empty history.
        self.get(id).await?;
        let creation = self.ctx.tracking.creation_logs(id).await?;
        let deletion = self.ctx.tracking.latest_deletion(id).await?;
        Ok(SubdomainHistory { creation, deletion })
    }

    /// What a deletion of this subdomain would remove. Refused for fully
    /// deleted subdomains, same as deletion itself.
    pub async fn deletion_preview(&self, id: i64) -> CoreResult<DeletionPreview> {
        let subdomain = self.get(id).await?;
        if subdomain.status == SubdomainStatus::Deleted {
            return Err(CoreError::AlreadyDeleted(subdomain.name));
        }
        Ok(DeletionPreview::from(&subdomain))
    }
}
