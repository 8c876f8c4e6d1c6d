//! `SeaORM` entity for the `subdomains` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subdomains")]
/// Database row model for a tracked subdomain.
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub full_domain: String,
    pub focus: Option<String>,
    pub lms: Option<String>,
    pub description: Option<String>,
    pub content_generated: bool,
    pub database_name: Option<String>,
    pub dns_record_id: Option<String>,
    pub directory_path: Option<String>,
    pub created_at: String,
    pub created_by: String,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
