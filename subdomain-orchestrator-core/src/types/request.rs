//! Caller-facing request types.

use serde::{Deserialize, Serialize};

/// A subdomain creation request, as submitted by the presentation layer.
///
/// `name` is raw input; it is normalized and policy-validated by the
/// orchestrator before anything else happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreationRequest {
    pub name: String,
    /// Educational focus (free text, optional).
    #[serde(default)]
    pub focus: Option<String>,
    /// Primary LMS (free text, optional).
    #[serde(default)]
    pub lms: Option<String>,
    /// Description (free text, optional).
    #[serde(default)]
    pub description: Option<String>,
    /// Skip the optional content-generation step.
    #[serde(default)]
    pub skip_content: bool,
}

/// Per-request caller context: who is asking, from where.
///
/// `session_id` scopes the rate-limit windows; `remote_addr` is recorded on
/// every audit entry and tracking row.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub session_id: String,
    pub remote_addr: String,
}

impl RequestContext {
    #[must_use]
    pub fn new(session_id: impl Into<String>, remote_addr: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            remote_addr: remote_addr.into(),
        }
    }
}
