//! `SeaORM` entity for the `deletion_log` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "deletion_log")]
/// One deletion run. Retried deletions append additional rows.
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subdomain_id: i64,
    pub deleted_at: String,
    pub deleted_by: String,
    pub dns_deleted: bool,
    pub hosting_deleted: bool,
    pub database_deleted: bool,
    pub files_deleted: bool,
    /// JSON array of per-resource error strings.
    pub errors: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
