use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // subdomains table
        manager
            .create_table(
                Table::create()
                    .table(Subdomain::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subdomain::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subdomain::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subdomain::FullDomain).string().not_null())
                    .col(ColumnDef::new(Subdomain::Focus).string().null())
                    .col(ColumnDef::new(Subdomain::Lms).string().null())
                    .col(ColumnDef::new(Subdomain::Description).string().null())
                    .col(
                        ColumnDef::new(Subdomain::ContentGenerated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Subdomain::DatabaseName).string().null())
                    .col(ColumnDef::new(Subdomain::DnsRecordId).string().null())
                    .col(ColumnDef::new(Subdomain::DirectoryPath).string().null())
                    .col(ColumnDef::new(Subdomain::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Subdomain::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Subdomain::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .to_owned(),
            )
            .await?;

        // creation_log table
        manager
            .create_table(
                Table::create()
                    .table(CreationLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CreationLog::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CreationLog::SubdomainId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CreationLog::StepName).string().not_null())
                    .col(ColumnDef::new(CreationLog::Status).string().not_null())
                    .col(ColumnDef::new(CreationLog::Message).string().not_null())
                    .col(ColumnDef::new(CreationLog::Timestamp).string().not_null())
                    .col(ColumnDef::new(CreationLog::Origin).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_creation_log_subdomain_id")
                    .table(CreationLog::Table)
                    .col(CreationLog::SubdomainId)
                    .to_owned(),
            )
            .await?;

        // deletion_log table
        manager
            .create_table(
                Table::create()
                    .table(DeletionLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeletionLog::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DeletionLog::SubdomainId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DeletionLog::DeletedAt).string().not_null())
                    .col(ColumnDef::new(DeletionLog::DeletedBy).string().not_null())
                    .col(
                        ColumnDef::new(DeletionLog::DnsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DeletionLog::HostingDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DeletionLog::DatabaseDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DeletionLog::FilesDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DeletionLog::Errors)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_deletion_log_subdomain_id")
                    .table(DeletionLog::Table)
                    .col(DeletionLog::SubdomainId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeletionLog::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CreationLog::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subdomain::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Subdomain {
    #[sea_orm(iden = "subdomains")]
    Table,
    Id,
    Name,
    FullDomain,
    Focus,
    Lms,
    Description,
    ContentGenerated,
    DatabaseName,
    DnsRecordId,
    DirectoryPath,
    CreatedAt,
    CreatedBy,
    Status,
}

#[derive(DeriveIden)]
enum CreationLog {
    #[sea_orm(iden = "creation_log")]
    Table,
    Id,
    SubdomainId,
    StepName,
    Status,
    Message,
    Timestamp,
    Origin,
}

#[derive(DeriveIden)]
enum DeletionLog {
    #[sea_orm(iden = "deletion_log")]
    Table,
    Id,
    SubdomainId,
    DeletedAt,
    DeletedBy,
    DnsDeleted,
    HostingDeleted,
    DatabaseDeleted,
    FilesDeleted,
    Errors,
}
