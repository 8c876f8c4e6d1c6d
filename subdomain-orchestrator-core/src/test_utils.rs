//! Test helpers: in-memory mock implementations of every seam, with
//! per-operation failure injection.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use subdomain_orchestrator_provider::{
    DnsClient, DnsRecord, FilesystemClient, HostingClient, ProviderError, WebRootGuard,
};
use tokio::sync::RwLock;

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{CoreError, CoreResult};
use crate::ratelimit::RateLimiter;
use crate::services::ServiceContext;
use crate::traits::{AuditSink, TrackingStore};
use crate::types::{
    CreationLogEntry, DeletionOutcome, DeletionRecord, NewSubdomain, OrchestratorConfig,
    StatusFilter, Subdomain, SubdomainStatus,
};

const MOCK_PROVIDER: &str = "mock";

fn mock_api_error(detail: &str) -> ProviderError {
    ProviderError::ApiError {
        provider: MOCK_PROVIDER.to_string(),
        raw_code: None,
        raw_message: detail.to_string(),
    }
}

// ===== MockDnsClient =====

pub struct MockDnsClient {
    records: RwLock<HashMap<String, DnsRecord>>,
    fail_find: RwLock<Option<String>>,
    fail_create: RwLock<Option<String>>,
    fail_delete: RwLock<Option<String>>,
    mutations: AtomicUsize,
    next_id: AtomicI64,
}

impl MockDnsClient {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            fail_find: RwLock::new(None),
            fail_create: RwLock::new(None),
            fail_delete: RwLock::new(None),
            mutations: AtomicUsize::new(0),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn set_fail_find(&self, err: Option<&str>) {
        *self.fail_find.write().await = err.map(String::from);
    }

    pub async fn set_fail_create(&self, err: Option<&str>) {
        *self.fail_create.write().await = err.map(String::from);
    }

    pub async fn set_fail_delete(&self, err: Option<&str>) {
        *self.fail_delete.write().await = err.map(String::from);
    }

    pub async fn seed_record(&self, full_domain: &str, target: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.records.write().await.insert(
            full_domain.to_string(),
            DnsRecord {
                id: id.to_string(),
                name: full_domain.to_string(),
                record_type: "CNAME".to_string(),
                content: target.to_string(),
                proxied: Some(true),
            },
        );
    }

    pub async fn has_record(&self, full_domain: &str) -> bool {
        self.records.read().await.contains_key(full_domain)
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsClient for MockDnsClient {
    fn id(&self) -> &'static str {
        MOCK_PROVIDER
    }

    async fn find_record(
        &self,
        full_domain: &str,
    ) -> subdomain_orchestrator_provider::Result<Option<DnsRecord>> {
        if let Some(ref msg) = *self.fail_find.read().await {
            return Err(mock_api_error(msg));
        }
        Ok(self.records.read().await.get(full_domain).cloned())
    }

    async fn create_record(
        &self,
        full_domain: &str,
        target: &str,
    ) -> subdomain_orchestrator_provider::Result<String> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = *self.fail_create.read().await {
            return Err(mock_api_error(msg));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        self.records.write().await.insert(
            full_domain.to_string(),
            DnsRecord {
                id: id.clone(),
                name: full_domain.to_string(),
                record_type: "CNAME".to_string(),
                content: target.to_string(),
                proxied: Some(true),
            },
        );
        Ok(id)
    }

    async fn delete_record(
        &self,
        full_domain: &str,
    ) -> subdomain_orchestrator_provider::Result<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = *self.fail_delete.read().await {
            return Err(mock_api_error(msg));
        }
        match self.records.write().await.remove(full_domain) {
            Some(_) => Ok(()),
            None => Err(ProviderError::RecordNotFound {
                provider: MOCK_PROVIDER.to_string(),
                name: full_domain.to_string(),
            }),
        }
    }
}

// ===== MockHostingClient =====

pub struct MockHostingClient {
    subdomains: RwLock<HashSet<String>>,
    databases: RwLock<HashSet<String>>,
    fail_create_subdomain: RwLock<Option<String>>,
    fail_delete_subdomain: RwLock<Option<String>>,
    fail_create_database: RwLock<Option<String>>,
    fail_delete_database: RwLock<Option<String>>,
    mutations: AtomicUsize,
}

impl MockHostingClient {
    pub fn new() -> Self {
        Self {
            subdomains: RwLock::new(HashSet::new()),
            databases: RwLock::new(HashSet::new()),
            fail_create_subdomain: RwLock::new(None),
            fail_delete_subdomain: RwLock::new(None),
            fail_create_database: RwLock::new(None),
            fail_delete_database: RwLock::new(None),
            mutations: AtomicUsize::new(0),
        }
    }

    pub async fn set_fail_create_subdomain(&self, err: Option<&str>) {
        *self.fail_create_subdomain.write().await = err.map(String::from);
    }

    pub async fn set_fail_delete_subdomain(&self, err: Option<&str>) {
        *self.fail_delete_subdomain.write().await = err.map(String::from);
    }

    pub async fn set_fail_create_database(&self, err: Option<&str>) {
        *self.fail_create_database.write().await = err.map(String::from);
    }

    pub async fn set_fail_delete_database(&self, err: Option<&str>) {
        *self.fail_delete_database.write().await = err.map(String::from);
    }

    pub async fn seed_subdomain(&self, full_domain: &str) {
        self.subdomains.write().await.insert(full_domain.to_string());
    }

    pub async fn seed_database(&self, name: &str) {
        self.databases.write().await.insert(name.to_string());
    }

    pub async fn has_subdomain(&self, full_domain: &str) -> bool {
        self.subdomains.read().await.contains(full_domain)
    }

    pub async fn has_database(&self, name: &str) -> bool {
        self.databases.read().await.contains(name)
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostingClient for MockHostingClient {
    fn id(&self) -> &'static str {
        MOCK_PROVIDER
    }

    async fn subdomain_exists(
        &self,
        full_domain: &str,
    ) -> subdomain_orchestrator_provider::Result<bool> {
        Ok(self.subdomains.read().await.contains(full_domain))
    }

    async fn create_subdomain(
        &self,
        name: &str,
        root_domain: &str,
        _document_root: &str,
    ) -> subdomain_orchestrator_provider::Result<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = *self.fail_create_subdomain.read().await {
            return Err(mock_api_error(msg));
        }
        self.subdomains
            .write()
            .await
            .insert(format!("{name}.{root_domain}"));
        Ok(())
    }

    async fn delete_subdomain(
        &self,
        name: &str,
        root_domain: &str,
    ) -> subdomain_orchestrator_provider::Result<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = *self.fail_delete_subdomain.read().await {
            return Err(mock_api_error(msg));
        }
        self.subdomains
            .write()
            .await
            .remove(&format!("{name}.{root_domain}"));
        Ok(())
    }

    async fn database_exists(&self, name: &str) -> subdomain_orchestrator_provider::Result<bool> {
        Ok(self.databases.read().await.contains(name))
    }

    async fn create_database(&self, name: &str) -> subdomain_orchestrator_provider::Result<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = *self.fail_create_database.read().await {
            return Err(mock_api_error(msg));
        }
        self.databases.write().await.insert(name.to_string());
        Ok(())
    }

    async fn delete_database(&self, name: &str) -> subdomain_orchestrator_provider::Result<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = *self.fail_delete_database.read().await {
            return Err(mock_api_error(msg));
        }
        self.databases.write().await.remove(name);
        Ok(())
    }
}

// ===== MockFilesystem =====

pub struct MockFilesystem {
    dirs: RwLock<HashSet<PathBuf>>,
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    fail_delete: RwLock<Option<String>>,
    mutations: AtomicUsize,
}

impl MockFilesystem {
    pub fn new() -> Self {
        Self {
            dirs: RwLock::new(HashSet::new()),
            files: RwLock::new(HashMap::new()),
            fail_delete: RwLock::new(None),
            mutations: AtomicUsize::new(0),
        }
    }

    pub async fn set_fail_delete(&self, err: Option<&str>) {
        *self.fail_delete.write().await = err.map(String::from);
    }

    pub async fn seed_dir(&self, path: &Path) {
        self.dirs.write().await.insert(path.to_path_buf());
    }

    pub async fn has_dir(&self, path: &Path) -> bool {
        self.dirs.read().await.contains(path)
    }

    pub async fn file_contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().await.get(path).cloned()
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FilesystemClient for MockFilesystem {
    async fn directory_exists(&self, path: &Path) -> bool {
        self.dirs.read().await.contains(path)
    }

    async fn create_tree(&self, paths: &[PathBuf]) -> subdomain_orchestrator_provider::Result<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut dirs = self.dirs.write().await;
        for path in paths {
            dirs.insert(path.clone());
        }
        Ok(())
    }

    async fn copy_tree(
        &self,
        source: &Path,
        dest: &Path,
    ) -> subdomain_orchestrator_provider::Result<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.dirs.write().await.insert(dest.to_path_buf());
        // Simulate a template tree containing a landing page.
        let _ = source;
        self.files.write().await.insert(
            dest.join("index.html"),
            b"<h1>{{WELCOME_TITLE}}</h1><p>{{HERO_TAGLINE}}</p>{{WELCOME_CONTENT}}".to_vec(),
        );
        Ok(())
    }

    async fn write_file(
        &self,
        path: &Path,
        contents: &str,
    ) -> subdomain_orchestrator_provider::Result<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.files
            .write()
            .await
            .insert(path.to_path_buf(), contents.as_bytes().to_vec());
        Ok(())
    }

    async fn apply_placeholders(
        &self,
        path: &Path,
        replacements: &[(&str, String)],
    ) -> subdomain_orchestrator_provider::Result<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut files = self.files.write().await;
        if let Some(contents) = files.get_mut(path) {
            let mut text = String::from_utf8_lossy(contents).into_owned();
            for (key, value) in replacements {
                text = text.replace(&format!("{{{{{key}}}}}"), value);
            }
            *contents = text.into_bytes();
        }
        Ok(())
    }

    async fn delete_tree(
        &self,
        path: &Path,
        _guard: &WebRootGuard,
    ) -> subdomain_orchestrator_provider::Result<PathBuf> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = *self.fail_delete.read().await {
            return Err(ProviderError::Filesystem {
                path: path.display().to_string(),
                detail: msg.clone(),
            });
        }
        if !self.dirs.read().await.contains(path) {
            return Err(ProviderError::DirectoryNotFound {
                path: path.display().to_string(),
            });
        }
        self.dirs.write().await.retain(|d| !d.starts_with(path));
        self.files.write().await.retain(|f, _| !f.starts_with(path));
        Ok(path.to_path_buf())
    }
}

// ===== MockTrackingStore =====

pub struct MockTrackingStore {
    rows: RwLock<HashMap<i64, Subdomain>>,
    creation_logs: RwLock<HashMap<i64, Vec<CreationLogEntry>>>,
    deletions: RwLock<HashMap<i64, Vec<DeletionRecord>>>,
    insert_error: RwLock<Option<String>>,
    next_id: AtomicI64,
}

impl MockTrackingStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            creation_logs: RwLock::new(HashMap::new()),
            deletions: RwLock::new(HashMap::new()),
            insert_error: RwLock::new(None),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn set_insert_error(&self, err: Option<&str>) {
        *self.insert_error.write().await = err.map(String::from);
    }

    pub async fn seed_subdomain(&self, name: &str, status: SubdomainStatus) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.rows.write().await.insert(
            id,
            Subdomain {
                id,
                name: name.to_string(),
                full_domain: format!("{name}.example.com"),
                focus: None,
                lms: None,
                description: None,
                content_generated: false,
                database_name: None,
                dns_record_id: None,
                directory_path: None,
                created_at: Utc::now(),
                created_by: "test".to_string(),
                status,
            },
        );
    }

    pub async fn deletion_records(&self, subdomain_id: i64) -> Vec<DeletionRecord> {
        self.deletions
            .read()
            .await
            .get(&subdomain_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl TrackingStore for MockTrackingStore {
    async fn insert(&self, subdomain: NewSubdomain) -> CoreResult<i64> {
        if let Some(ref msg) = *self.insert_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        let mut rows = self.rows.write().await;
        if rows.values().any(|s| s.name == subdomain.name) {
            return Err(CoreError::StorageError(format!(
                "UNIQUE constraint failed: subdomains.name ({})",
                subdomain.name
            )));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.insert(
            id,
            Subdomain {
                id,
                name: subdomain.name,
                full_domain: subdomain.full_domain,
                focus: subdomain.focus,
                lms: subdomain.lms,
                description: subdomain.description,
                content_generated: subdomain.content_generated,
                database_name: subdomain.database_name,
                dns_record_id: subdomain.dns_record_id,
                directory_path: subdomain.directory_path,
                created_at: Utc::now(),
                created_by: subdomain.created_by,
                status: SubdomainStatus::Active,
            },
        );
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Subdomain>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> CoreResult<Option<Subdomain>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|s| s.name == name)
            .cloned())
    }

    async fn list(
        &self,
        filter: StatusFilter,
        limit: u64,
        offset: u64,
    ) -> CoreResult<Vec<Subdomain>> {
        let mut items: Vec<Subdomain> = self
            .rows
            .read()
            .await
            .values()
            .filter(|s| filter.status().map_or(true, |status| s.status == status))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn count(&self, filter: StatusFilter) -> CoreResult<u64> {
        let count = self
            .rows
            .read()
            .await
            .values()
            .filter(|s| filter.status().map_or(true, |status| s.status == status))
            .count();
        Ok(count as u64)
    }

    async fn append_creation_log(
        &self,
        subdomain_id: i64,
        entry: CreationLogEntry,
    ) -> CoreResult<()> {
        self.creation_logs
            .write()
            .await
            .entry(subdomain_id)
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn creation_logs(&self, subdomain_id: i64) -> CoreResult<Vec<CreationLogEntry>> {
        Ok(self
            .creation_logs
            .read()
            .await
            .get(&subdomain_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn record_deletion(
        &self,
        subdomain_id: i64,
        outcome: DeletionOutcome,
        new_status: SubdomainStatus,
    ) -> CoreResult<()> {
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(&subdomain_id)
            .ok_or_else(|| CoreError::SubdomainNotFound(subdomain_id.to_string()))?;
        row.status = new_status;
        self.deletions
            .write()
            .await
            .entry(subdomain_id)
            .or_default()
            .push(DeletionRecord {
                subdomain_id,
                deleted_at: Utc::now(),
                deleted_by: outcome.deleted_by,
                dns_deleted: outcome.dns_deleted,
                hosting_deleted: outcome.hosting_deleted,
                database_deleted: outcome.database_deleted,
                files_deleted: outcome.files_deleted,
                errors: outcome.errors,
            });
        Ok(())
    }

    async fn latest_deletion(&self, subdomain_id: i64) -> CoreResult<Option<DeletionRecord>> {
        Ok(self
            .deletions
            .read()
            .await
            .get(&subdomain_id)
            .and_then(|records| records.last().cloned()))
    }
}

// ===== MemoryAuditSink =====

pub struct MemoryAuditSink {
    pub entries: RwLock<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn write(&self, entry: &AuditEntry) -> CoreResult<()> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }
}

// ===== Factory =====

pub struct TestHarness {
    pub dns: Arc<MockDnsClient>,
    pub hosting: Arc<MockHostingClient>,
    pub filesystem: Arc<MockFilesystem>,
    pub tracking: Arc<MockTrackingStore>,
    pub audit_sink: Arc<MemoryAuditSink>,
    pub ctx: Arc<ServiceContext>,
}

pub fn test_config() -> OrchestratorConfig {
    OrchestratorConfig {
        root_domain: "example.com".to_string(),
        web_root: PathBuf::from("/srv/www"),
        template_path: PathBuf::from("/srv/templates/site"),
        db_prefix: "apiprofe".to_string(),
    }
}

/// Mock-backed service context with default rate limits.
pub fn create_test_harness() -> TestHarness {
    create_test_harness_with_limiter(RateLimiter::default())
}

pub fn create_test_harness_with_limiter(rate_limiter: RateLimiter) -> TestHarness {
    let dns = Arc::new(MockDnsClient::new());
    let hosting = Arc::new(MockHostingClient::new());
    let filesystem = Arc::new(MockFilesystem::new());
    let tracking = Arc::new(MockTrackingStore::new());
    let audit_sink = Arc::new(MemoryAuditSink::new());

    let ctx = Arc::new(ServiceContext {
        dns: dns.clone(),
        hosting: hosting.clone(),
        filesystem: filesystem.clone(),
        tracking: tracking.clone(),
        audit: AuditLogger::new(audit_sink.clone()),
        content: None,
        rate_limiter,
        config: test_config(),
    });

    TestHarness {
        dns,
        hosting,
        filesystem,
        tracking,
        audit_sink,
        ctx,
    }
}
