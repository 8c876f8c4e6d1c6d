//! Operator-facing audit trail.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::AuditSink;

/// Severity of an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditLevel {
    Info,
    Success,
    Warning,
    Error,
    Security,
}

impl AuditLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Security => "SECURITY",
        }
    }
}

/// One audit event: what happened, how severe, who triggered it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub level: AuditLevel,
    pub message: String,
    /// Address of the originating client.
    pub origin: String,
}

/// Writes audit entries to a sink and mirrors them to the process log.
///
/// Sink failures are reported on the process log and otherwise swallowed; an
/// unwritable audit trail must never abort a lifecycle operation.
#[derive(Clone)]
pub struct AuditLogger {
    sink: Arc<dyn AuditSink>,
}

impl AuditLogger {
    #[must_use]
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    pub async fn log(&self, level: AuditLevel, message: impl Into<String>, origin: &str) {
        let entry = AuditEntry {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            origin: origin.to_string(),
        };
        match level {
            AuditLevel::Info | AuditLevel::Success => {
                log::info!("[{}] {} ({})", level.as_str(), entry.message, entry.origin);
            }
            AuditLevel::Warning => {
                log::warn!("[{}] {} ({})", level.as_str(), entry.message, entry.origin);
            }
            AuditLevel::Error => {
                log::error!("[{}] {} ({})", level.as_str(), entry.message, entry.origin);
            }
            AuditLevel::Security => {
                log::error!("SECURITY: {} ({})", entry.message, entry.origin);
            }
        }
        if let Err(e) = self.sink.write(&entry).await {
            log::warn!("Failed to write audit entry: {e}");
        }
    }

    pub async fn info(&self, message: impl Into<String>, origin: &str) {
        self.log(AuditLevel::Info, message, origin).await;
    }

    pub async fn success(&self, message: impl Into<String>, origin: &str) {
        self.log(AuditLevel::Success, message, origin).await;
    }

    pub async fn warning(&self, message: impl Into<String>, origin: &str) {
        self.log(AuditLevel::Warning, message, origin).await;
    }

    pub async fn error(&self, message: impl Into<String>, origin: &str) {
        self.log(AuditLevel::Error, message, origin).await;
    }

    pub async fn security(&self, message: impl Into<String>, origin: &str) {
        self.log(AuditLevel::Security, message, origin).await;
    }
}
