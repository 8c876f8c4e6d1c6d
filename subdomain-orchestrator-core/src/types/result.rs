//! Structured results returned to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::subdomain::{
    CreationLogEntry, DeletionRecord, StepStatus, Subdomain, SubdomainStatus,
};

/// One transition of the creation saga.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationStep {
    Hosting,
    Dns,
    Database,
    Directory,
    Content,
    Files,
    Config,
    Tracking,
}

impl CreationStep {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hosting => "hosting",
            Self::Dns => "dns",
            Self::Database => "database",
            Self::Directory => "directory",
            Self::Content => "content",
            Self::Files => "files",
            Self::Config => "config",
            Self::Tracking => "tracking",
        }
    }
}

/// One attempted step, success or failure, in execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub name: String,
    pub status: StepStatus,
    pub message: String,
}

impl StepReport {
    #[must_use]
    pub fn new(name: impl Into<String>, status: StepStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
        }
    }
}

/// Result of a creation run.
///
/// On saga failure `success` is `false`, `errors` is non-empty, and `steps`
/// covers everything attempted up to the failure point. `completed_steps`
/// records finished transitions for future rollback tooling; prior
/// successfully-provisioned resources are NOT cleaned up automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreationResult {
    pub success: bool,
    pub subdomain_id: Option<i64>,
    pub subdomain_url: Option<String>,
    pub steps: Vec<StepReport>,
    pub completed_steps: Vec<CreationStep>,
    pub errors: Vec<String>,
}

impl CreationResult {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            success: true,
            subdomain_id: None,
            subdomain_url: None,
            steps: Vec::new(),
            completed_steps: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Result of a deletion run: per-resource accounting, never aborted early.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionResult {
    pub subdomain_id: i64,
    pub subdomain_name: String,
    pub dns_deleted: bool,
    pub hosting_deleted: bool,
    pub database_deleted: bool,
    pub files_deleted: bool,
    /// Per-resource error strings, e.g. `"Directory: ..."`.
    pub errors: Vec<String>,
    /// Final status written to the tracking store.
    pub status: SubdomainStatus,
    /// Human-readable step summary lines, in execution order.
    pub steps: Vec<String>,
}

/// One page of tracked subdomains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubdomainPage {
    pub items: Vec<Subdomain>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Creation and deletion history for one subdomain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubdomainHistory {
    pub creation: Vec<CreationLogEntry>,
    pub deletion: Option<DeletionRecord>,
}

/// What a deletion of this subdomain would touch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionPreview {
    pub subdomain_name: String,
    pub full_domain: String,
    pub database_name: Option<String>,
    pub directory_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub focus: Option<String>,
    pub status: SubdomainStatus,
}

impl From<&Subdomain> for DeletionPreview {
    fn from(s: &Subdomain) -> Self {
        Self {
            subdomain_name: s.name.clone(),
            full_domain: s.full_domain.clone(),
            database_name: s.database_name.clone(),
            directory_path: s.directory_path.clone(),
            created_at: s.created_at,
            focus: s.focus.clone(),
            status: s.status,
        }
    }
}
