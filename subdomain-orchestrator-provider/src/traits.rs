use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DnsRecord, WebRootGuard};

/// DNS provider client.
///
/// One record per hosted subdomain; lookup is by full domain name so the
/// orchestrator never needs to track provider record ids to delete.
#[async_trait]
pub trait DnsClient: Send + Sync {
    /// Client identifier (for logging and error attribution).
    fn id(&self) -> &'static str;

    /// Find the record matching `full_domain`, if any.
    async fn find_record(&self, full_domain: &str) -> Result<Option<DnsRecord>>;

    /// Create a record pointing `full_domain` at `target`.
    ///
    /// Returns the provider-assigned record id.
    async fn create_record(&self, full_domain: &str, target: &str) -> Result<String>;

    /// Delete the record matching `full_domain`.
    ///
    /// A record that is already absent is reported as
    /// [`ProviderError::RecordNotFound`](crate::ProviderError::RecordNotFound),
    /// not silently treated as success.
    async fn delete_record(&self, full_domain: &str) -> Result<()>;
}

/// Hosting control-panel client (subdomain records and databases).
#[async_trait]
pub trait HostingClient: Send + Sync {
    /// Client identifier (for logging and error attribution).
    fn id(&self) -> &'static str;

    /// Whether a subdomain record for `full_domain` exists in the panel.
    async fn subdomain_exists(&self, full_domain: &str) -> Result<bool>;

    /// Create a subdomain of `root_domain` with the given document root.
    async fn create_subdomain(
        &self,
        name: &str,
        root_domain: &str,
        document_root: &str,
    ) -> Result<()>;

    /// Delete the subdomain `name` of `root_domain`.
    async fn delete_subdomain(&self, name: &str, root_domain: &str) -> Result<()>;

    /// Whether a database named `db_name` exists.
    async fn database_exists(&self, db_name: &str) -> Result<bool>;

    /// Create a database named `db_name`.
    async fn create_database(&self, db_name: &str) -> Result<()>;

    /// Delete the database named `db_name`.
    async fn delete_database(&self, db_name: &str) -> Result<()>;
}

/// Filesystem client for the subdomain document trees.
///
/// All destructive operations go through [`delete_tree`](Self::delete_tree),
/// which enforces the web-root path-safety invariants before any mutation.
#[async_trait]
pub trait FilesystemClient: Send + Sync {
    /// Whether `path` exists and is a directory.
    async fn directory_exists(&self, path: &Path) -> bool;

    /// Create every directory in `paths` (parents included, idempotent).
    async fn create_tree(&self, paths: &[PathBuf]) -> Result<()>;

    /// Recursively copy `src` into `dst`.
    async fn copy_tree(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Write `contents` to `path`, replacing any existing file.
    async fn write_file(&self, path: &Path, contents: &str) -> Result<()>;

    /// Replace `{{KEY}}` placeholders in the file at `path`.
    ///
    /// Missing files are a no-op: templates are allowed to omit any of the
    /// customizable pages.
    async fn apply_placeholders(&self, path: &Path, replacements: &[(&str, String)]) -> Result<()>;

    /// Safely delete the directory tree at `path`.
    ///
    /// Refuses (without mutating anything) unless `path` resolves to an
    /// existing location strictly below the guard's web root, containing the
    /// guard's domain suffix, and distinct from the web root itself.
    /// Returns the canonical path that was deleted.
    async fn delete_tree(&self, path: &Path, guard: &WebRootGuard) -> Result<PathBuf>;
}
