//! `SeaORM` entity for the `creation_log` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "creation_log")]
/// One provisioning-step record. Append-only.
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subdomain_id: i64,
    pub step_name: String,
    pub status: String,
    pub message: String,
    pub timestamp: String,
    pub origin: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
