//! File-backed audit sink.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use subdomain_orchestrator_core::audit::AuditEntry;
use subdomain_orchestrator_core::error::{CoreError, CoreResult};
use subdomain_orchestrator_core::traits::AuditSink;
use tokio::sync::Mutex;

/// Appends audit entries to a local file, one JSON object per line.
///
/// Writes are serialized through a mutex so concurrent lifecycle operations
/// cannot interleave partial lines.
pub struct FileAuditSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileAuditSink {
    /// Create a sink writing to `path`. The parent directory is created if
    /// missing; the file itself is created on first write.
    pub fn new(path: &Path) -> CoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl AuditSink for FileAuditSink {
    async fn write(&self, entry: &AuditEntry) -> CoreResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        let _guard = self.write_lock.lock().await;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| CoreError::StorageError(format!("Failed to open audit log: {e}")))?;
        writeln!(file, "{line}")
            .map_err(|e| CoreError::StorageError(format!("Failed to write audit log: {e}")))?;
        Ok(())
    }
}
