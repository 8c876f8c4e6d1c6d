//! Subdomain entity, creation log, and deletion records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a tracked subdomain.
///
/// Transitions are forward-only: `active` → `deleted` | `partially_deleted`.
/// Terminal states never revert; rows are never physically removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubdomainStatus {
    Active,
    Deleted,
    PartiallyDeleted,
}

impl SubdomainStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
            Self::PartiallyDeleted => "partially_deleted",
        }
    }

    /// Parse a stored status string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "deleted" => Some(Self::Deleted),
            "partially_deleted" => Some(Self::PartiallyDeleted),
            _ => None,
        }
    }
}

/// Status filter for list/count queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Active,
    Deleted,
    PartiallyDeleted,
    All,
}

impl StatusFilter {
    /// The concrete status this filter selects, or `None` for `All`.
    #[must_use]
    pub fn status(self) -> Option<SubdomainStatus> {
        match self {
            Self::Active => Some(SubdomainStatus::Active),
            Self::Deleted => Some(SubdomainStatus::Deleted),
            Self::PartiallyDeleted => Some(SubdomainStatus::PartiallyDeleted),
            Self::All => None,
        }
    }
}

/// A tracked subdomain: the composite of a DNS record, a hosting-panel
/// subdomain, a database, and a directory tree, managed as one unit.
///
/// Owned exclusively by the tracking store. Resource identifier fields stay
/// `None` until the corresponding provisioning step completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subdomain {
    /// Store-assigned id.
    pub id: i64,
    /// Unique lowercase name (policy-validated).
    pub name: String,
    /// Full domain string, e.g. `art.example.com`.
    pub full_domain: String,
    /// Educational focus (free text).
    pub focus: Option<String>,
    /// Primary LMS (free text).
    pub lms: Option<String>,
    /// Description (free text).
    pub description: Option<String>,
    /// Whether generated content was used during provisioning.
    pub content_generated: bool,
    /// Provisioned database name.
    pub database_name: Option<String>,
    /// Provider-assigned DNS record id.
    pub dns_record_id: Option<String>,
    /// Provisioned document tree path.
    pub directory_path: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Address of the creating client.
    pub created_by: String,
    pub status: SubdomainStatus,
}

/// Insert payload for a new subdomain row (id and timestamp are assigned by
/// the store).
#[derive(Debug, Clone)]
pub struct NewSubdomain {
    pub name: String,
    pub full_domain: String,
    pub focus: Option<String>,
    pub lms: Option<String>,
    pub description: Option<String>,
    pub content_generated: bool,
    pub database_name: Option<String>,
    pub dns_record_id: Option<String>,
    pub directory_path: Option<String>,
    pub created_by: String,
}

/// Outcome of one step in a creation or deletion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "ERROR")]
    Error,
}

impl StepStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// Append-only record of one provisioning step. Never mutated after insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreationLogEntry {
    pub step_name: String,
    pub status: StepStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Address of the originating client.
    pub origin: String,
}

/// Per-resource outcome of a deletion run, written together with the status
/// update in one tracking-store transaction.
#[derive(Debug, Clone)]
pub struct DeletionOutcome {
    pub dns_deleted: bool,
    pub hosting_deleted: bool,
    pub database_deleted: bool,
    pub files_deleted: bool,
    pub errors: Vec<String>,
    pub deleted_by: String,
}

impl DeletionOutcome {
    /// `deleted` iff all four resource deletions succeeded, else
    /// `partially_deleted`.
    #[must_use]
    pub fn status(&self) -> SubdomainStatus {
        if self.dns_deleted && self.hosting_deleted && self.database_deleted && self.files_deleted {
            SubdomainStatus::Deleted
        } else {
            SubdomainStatus::PartiallyDeleted
        }
    }
}

/// A persisted deletion record (one per deletion run; retries append more).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionRecord {
    pub subdomain_id: i64,
    pub deleted_at: DateTime<Utc>,
    pub deleted_by: String,
    pub dns_deleted: bool,
    pub hosting_deleted: bool,
    pub database_deleted: bool,
    pub files_deleted: bool,
    pub errors: Vec<String>,
}
