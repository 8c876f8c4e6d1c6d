//! Shared test fixtures: in-memory provider clients and an in-memory audit
//! sink, wired around the real SQLite tracking store.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use subdomain_orchestrator_app::adapters::SqliteStore;
use subdomain_orchestrator_app::{AppState, AppStateBuilder};
use subdomain_orchestrator_core::audit::AuditEntry;
use subdomain_orchestrator_core::error::CoreResult;
use subdomain_orchestrator_core::traits::AuditSink;
use subdomain_orchestrator_core::types::OrchestratorConfig;
use subdomain_orchestrator_provider::{
    DnsClient, DnsRecord, FilesystemClient, HostingClient, ProviderError, Result as ProviderResult,
    WebRootGuard,
};
use tokio::sync::RwLock;

fn api_error(detail: &str) -> ProviderError {
    ProviderError::ApiError {
        provider: "fake".to_string(),
        raw_code: None,
        raw_message: detail.to_string(),
    }
}

// ===== FakeDns =====

#[derive(Default)]
pub struct FakeDns {
    pub records: RwLock<HashMap<String, String>>,
    pub mutations: AtomicUsize,
    next_id: AtomicI64,
}

#[async_trait]
impl DnsClient for FakeDns {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn find_record(&self, full_domain: &str) -> ProviderResult<Option<DnsRecord>> {
        Ok(self
            .records
            .read()
            .await
            .get(full_domain)
            .map(|id| DnsRecord {
                id: id.clone(),
                name: full_domain.to_string(),
                record_type: "CNAME".to_string(),
                content: String::new(),
                proxied: Some(true),
            }))
    }

    async fn create_record(&self, full_domain: &str, _target: &str) -> ProviderResult<String> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        self.records
            .write()
            .await
            .insert(full_domain.to_string(), id.clone());
        Ok(id)
    }

    async fn delete_record(&self, full_domain: &str) -> ProviderResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        match self.records.write().await.remove(full_domain) {
            Some(_) => Ok(()),
            None => Err(ProviderError::RecordNotFound {
                provider: "fake".to_string(),
                name: full_domain.to_string(),
            }),
        }
    }
}

// ===== FakeHosting =====

#[derive(Default)]
pub struct FakeHosting {
    pub subdomains: RwLock<HashSet<String>>,
    pub databases: RwLock<HashSet<String>>,
    pub mutations: AtomicUsize,
}

#[async_trait]
impl HostingClient for FakeHosting {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn subdomain_exists(&self, full_domain: &str) -> ProviderResult<bool> {
        Ok(self.subdomains.read().await.contains(full_domain))
    }

    async fn create_subdomain(
        &self,
        name: &str,
        root_domain: &str,
        _document_root: &str,
    ) -> ProviderResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.subdomains
            .write()
            .await
            .insert(format!("{name}.{root_domain}"));
        Ok(())
    }

    async fn delete_subdomain(&self, name: &str, root_domain: &str) -> ProviderResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.subdomains
            .write()
            .await
            .remove(&format!("{name}.{root_domain}"));
        Ok(())
    }

    async fn database_exists(&self, name: &str) -> ProviderResult<bool> {
        Ok(self.databases.read().await.contains(name))
    }

    async fn create_database(&self, name: &str) -> ProviderResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.databases.write().await.insert(name.to_string());
        Ok(())
    }

    async fn delete_database(&self, name: &str) -> ProviderResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.databases.write().await.remove(name);
        Ok(())
    }
}

// ===== FakeFilesystem =====

#[derive(Default)]
pub struct FakeFilesystem {
    pub dirs: RwLock<HashSet<PathBuf>>,
    pub files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    pub fail_delete: RwLock<Option<String>>,
    pub mutations: AtomicUsize,
}

#[async_trait]
impl FilesystemClient for FakeFilesystem {
    async fn directory_exists(&self, path: &Path) -> bool {
        self.dirs.read().await.contains(path)
    }

    async fn create_tree(&self, paths: &[PathBuf]) -> ProviderResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut dirs = self.dirs.write().await;
        for path in paths {
            dirs.insert(path.clone());
        }
        Ok(())
    }

    async fn copy_tree(&self, _source: &Path, dest: &Path) -> ProviderResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.dirs.write().await.insert(dest.to_path_buf());
        self.files.write().await.insert(
            dest.join("index.html"),
            b"<h1>{{WELCOME_TITLE}}</h1>".to_vec(),
        );
        Ok(())
    }

    async fn write_file(&self, path: &Path, contents: &str) -> ProviderResult<()> {
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
    ) -> ProviderResult<()> {
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

    async fn delete_tree(&self, path: &Path, _guard: &WebRootGuard) -> ProviderResult<PathBuf> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = *self.fail_delete.read().await {
            return Err(api_error(msg));
        }
        self.dirs.write().await.retain(|d| !d.starts_with(path));
        self.files.write().await.retain(|f, _| !f.starts_with(path));
        Ok(path.to_path_buf())
    }
}

// ===== MemorySink =====

#[derive(Default)]
pub struct MemorySink {
    pub entries: RwLock<Vec<AuditEntry>>,
}

#[async_trait]
impl AuditSink for MemorySink {
    async fn write(&self, entry: &AuditEntry) -> CoreResult<()> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }
}

// ===== Fixture =====

pub struct Fixture {
    pub app: AppState,
    pub dns: Arc<FakeDns>,
    pub hosting: Arc<FakeHosting>,
    pub filesystem: Arc<FakeFilesystem>,
    pub audit: Arc<MemorySink>,
    #[allow(dead_code)]
    tmp: tempfile::TempDir,
}

pub fn test_config() -> OrchestratorConfig {
    OrchestratorConfig {
        root_domain: "example.com".to_string(),
        web_root: PathBuf::from("/srv/www"),
        template_path: PathBuf::from("/srv/templates/site"),
        db_prefix: "apiprofe".to_string(),
    }
}

/// Full application state with fake providers and a real SQLite store in a
/// temp directory.
pub async fn create_fixture() -> Fixture {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = SqliteStore::new(&tmp.path().join("tracking.db"))
        .await
        .expect("failed to create SqliteStore");

    let dns = Arc::new(FakeDns::default());
    let hosting = Arc::new(FakeHosting::default());
    let filesystem = Arc::new(FakeFilesystem::default());
    let audit = Arc::new(MemorySink::default());

    let app = AppStateBuilder::new()
        .dns_client(dns.clone())
        .hosting_client(hosting.clone())
        .filesystem_client(filesystem.clone())
        .tracking_store(Arc::new(store))
        .audit_sink(audit.clone())
        .config(test_config())
        .build()
        .expect("failed to build AppState");

    Fixture {
        app,
        dns,
        hosting,
        filesystem,
        audit,
        tmp,
    }
}
