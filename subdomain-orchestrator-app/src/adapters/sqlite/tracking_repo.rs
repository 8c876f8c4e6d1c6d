//! `TrackingStore` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};

use subdomain_orchestrator_core::error::{CoreError, CoreResult};
use subdomain_orchestrator_core::traits::TrackingStore;
use subdomain_orchestrator_core::types::{
    CreationLogEntry, DeletionOutcome, DeletionRecord, NewSubdomain, StatusFilter, StepStatus,
    Subdomain, SubdomainStatus,
};

use super::entity::{creation_log, deletion_log, subdomain};
use super::SqliteStore;

fn parse_timestamp(raw: &str, field: &str) -> CoreResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&chrono::Utc))
        .map_err(|e| CoreError::SerializationError(format!("Invalid {field}: {e}")))
}

impl subdomain::Model {
    /// Convert a `SeaORM` row model into a domain `Subdomain`.
    fn into_subdomain(self) -> CoreResult<Subdomain> {
        let created_at = parse_timestamp(&self.created_at, "created_at")?;
        let status = SubdomainStatus::parse(&self.status)
            .ok_or_else(|| CoreError::SerializationError(format!("Invalid status: {}", self.status)))?;

        Ok(Subdomain {
            id: self.id,
            name: self.name,
            full_domain: self.full_domain,
            focus: self.focus,
            lms: self.lms,
            description: self.description,
            content_generated: self.content_generated,
            database_name: self.database_name,
            dns_record_id: self.dns_record_id,
            directory_path: self.directory_path,
            created_at,
            created_by: self.created_by,
            status,
        })
    }
}

impl creation_log::Model {
    fn into_entry(self) -> CoreResult<CreationLogEntry> {
        let timestamp = parse_timestamp(&self.timestamp, "timestamp")?;
        let status: StepStatus =
            serde_json::from_value(serde_json::Value::String(self.status))
                .map_err(|e| CoreError::SerializationError(format!("Invalid step status: {e}")))?;

        Ok(CreationLogEntry {
            step_name: self.step_name,
            status,
            message: self.message,
            timestamp,
            origin: self.origin,
        })
    }
}

impl deletion_log::Model {
    fn into_record(self) -> CoreResult<DeletionRecord> {
        let deleted_at = parse_timestamp(&self.deleted_at, "deleted_at")?;
        let errors: Vec<String> = serde_json::from_str(&self.errors)
            .map_err(|e| CoreError::SerializationError(format!("Invalid errors list: {e}")))?;

        Ok(DeletionRecord {
            subdomain_id: self.subdomain_id,
            deleted_at,
            deleted_by: self.deleted_by,
            dns_deleted: self.dns_deleted,
            hosting_deleted: self.hosting_deleted,
            database_deleted: self.database_deleted,
            files_deleted: self.files_deleted,
            errors,
        })
    }
}

fn status_filter(query: subdomain::Column, filter: StatusFilter) -> Option<sea_orm::sea_query::SimpleExpr> {
    filter.status().map(|status| query.eq(status.as_str()))
}

#[async_trait]
impl TrackingStore for SqliteStore {
    async fn insert(&self, new: NewSubdomain) -> CoreResult<i64> {
        let row = subdomain::ActiveModel {
            name: Set(new.name),
            full_domain: Set(new.full_domain),
            focus: Set(new.focus),
            lms: Set(new.lms),
            description: Set(new.description),
            content_generated: Set(new.content_generated),
            database_name: Set(new.database_name),
            dns_record_id: Set(new.dns_record_id),
            directory_path: Set(new.directory_path),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            created_by: Set(new.created_by),
            status: Set(SubdomainStatus::Active.as_str().to_string()),
            ..Default::default()
        };

        let result = subdomain::Entity::insert(row)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to insert subdomain: {e}")))?;

        Ok(result.last_insert_id)
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Subdomain>> {
        let row = subdomain::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query subdomain: {e}")))?;

        row.map(subdomain::Model::into_subdomain).transpose()
    }

    async fn find_by_name(&self, name: &str) -> CoreResult<Option<Subdomain>> {
        let row = subdomain::Entity::find()
            .filter(subdomain::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query subdomain: {e}")))?;

        row.map(subdomain::Model::into_subdomain).transpose()
    }

    async fn list(
        &self,
        filter: StatusFilter,
        limit: u64,
        offset: u64,
    ) -> CoreResult<Vec<Subdomain>> {
        let mut query = subdomain::Entity::find();
        if let Some(condition) = status_filter(subdomain::Column::Status, filter) {
            query = query.filter(condition);
        }
        let rows = query
            .order_by_desc(subdomain::Column::CreatedAt)
            .order_by_desc(subdomain::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to list subdomains: {e}")))?;

        rows.into_iter()
            .map(subdomain::Model::into_subdomain)
            .collect()
    }

    async fn count(&self, filter: StatusFilter) -> CoreResult<u64> {
        let mut query = subdomain::Entity::find();
        if let Some(condition) = status_filter(subdomain::Column::Status, filter) {
            query = query.filter(condition);
        }
        query
            .count(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to count subdomains: {e}")))
    }

    async fn append_creation_log(
        &self,
        subdomain_id: i64,
        entry: CreationLogEntry,
    ) -> CoreResult<()> {
        let row = creation_log::ActiveModel {
            subdomain_id: Set(subdomain_id),
            step_name: Set(entry.step_name),
            status: Set(entry.status.as_str().to_string()),
            message: Set(entry.message),
            timestamp: Set(entry.timestamp.to_rfc3339()),
            origin: Set(entry.origin),
            ..Default::default()
        };

        creation_log::Entity::insert(row)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to append creation log: {e}")))?;

        Ok(())
    }

    async fn creation_logs(&self, subdomain_id: i64) -> CoreResult<Vec<CreationLogEntry>> {
        let rows = creation_log::Entity::find()
            .filter(creation_log::Column::SubdomainId.eq(subdomain_id))
            .order_by_asc(creation_log::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query creation log: {e}")))?;

        rows.into_iter().map(creation_log::Model::into_entry).collect()
    }

    async fn record_deletion(
        &self,
        subdomain_id: i64,
        outcome: DeletionOutcome,
        new_status: SubdomainStatus,
    ) -> CoreResult<()> {
        let errors_json = serde_json::to_string(&outcome.errors)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        // Status update and deletion record land together or not at all.
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to begin transaction: {e}")))?;

        let update = subdomain::ActiveModel {
            id: Set(subdomain_id),
            status: Set(new_status.as_str().to_string()),
            ..Default::default()
        };
        subdomain::Entity::update(update)
            .exec(&txn)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to update status: {e}")))?;

        let record = deletion_log::ActiveModel {
            subdomain_id: Set(subdomain_id),
            deleted_at: Set(chrono::Utc::now().to_rfc3339()),
            deleted_by: Set(outcome.deleted_by),
            dns_deleted: Set(outcome.dns_deleted),
            hosting_deleted: Set(outcome.hosting_deleted),
            database_deleted: Set(outcome.database_deleted),
            files_deleted: Set(outcome.files_deleted),
            errors: Set(errors_json),
            ..Default::default()
        };
        deletion_log::Entity::insert(record)
            .exec(&txn)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to insert deletion record: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to commit deletion: {e}")))?;

        Ok(())
    }

    async fn latest_deletion(&self, subdomain_id: i64) -> CoreResult<Option<DeletionRecord>> {
        let row = deletion_log::Entity::find()
            .filter(deletion_log::Column::SubdomainId.eq(subdomain_id))
            .order_by_desc(deletion_log::Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query deletion log: {e}")))?;

        row.map(deletion_log::Model::into_record).transpose()
    }
}
