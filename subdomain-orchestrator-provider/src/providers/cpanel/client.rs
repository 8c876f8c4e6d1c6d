//! `HostingClient` trait implementation for cPanel.

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::HostingClient;

use super::{CpanelHost, DatabaseEntry, SubdomainEntry};

#[async_trait]
impl HostingClient for CpanelHost {
    fn id(&self) -> &'static str {
        "cpanel"
    }

    async fn subdomain_exists(&self, full_domain: &str) -> Result<bool> {
        let subdomains: Vec<SubdomainEntry> =
            self.execute("SubDomain/listsubdomains", &[]).await?;
        Ok(subdomains.iter().any(|s| s.domain == full_domain))
    }

    async fn create_subdomain(
        &self,
        name: &str,
        root_domain: &str,
        document_root: &str,
    ) -> Result<()> {
        self.execute_unit(
            "SubDomain/addsubdomain",
            &[
                ("domain", name),
                ("rootdomain", root_domain),
                ("dir", document_root),
            ],
        )
        .await?;

        log::info!("cPanel subdomain created: {name}.{root_domain}");
        Ok(())
    }

    async fn delete_subdomain(&self, name: &str, root_domain: &str) -> Result<()> {
        self.execute_unit(
            "SubDomain/delsubdomain",
            &[("domain", name), ("rootdomain", root_domain)],
        )
        .await?;

        log::info!("cPanel subdomain deleted: {name}.{root_domain}");
        Ok(())
    }

    async fn database_exists(&self, db_name: &str) -> Result<bool> {
        let databases: Vec<DatabaseEntry> = self.execute("Mysql/list_databases", &[]).await?;
        Ok(databases.iter().any(|db| db.name() == db_name))
    }

    async fn create_database(&self, db_name: &str) -> Result<()> {
        self.execute_unit("Mysql/create_database", &[("name", db_name)])
            .await?;

        log::info!("Database created: {db_name}");
        Ok(())
    }

    async fn delete_database(&self, db_name: &str) -> Result<()> {
        self.execute_unit("Mysql/delete_database", &[("name", db_name)])
            .await?;

        log::info!("Database deleted: {db_name}");
        Ok(())
    }
}
