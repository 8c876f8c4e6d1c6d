//! Orchestrator configuration and derived naming rules.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use subdomain_orchestrator_provider::WebRootGuard;

/// MySQL database name limit.
const MAX_DATABASE_NAME_LEN: usize = 64;

/// Static configuration every lifecycle operation derives its resource names
/// from. Replaces the original deployment's untyped config bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Root domain all subdomains hang off, e.g. `example.com`.
    pub root_domain: String,
    /// Absolute path to the directory holding subdomain document trees.
    pub web_root: PathBuf,
    /// Template tree copied into each new subdomain.
    pub template_path: PathBuf,
    /// Database naming prefix (typically the hosting account username).
    pub db_prefix: String,
}

impl OrchestratorConfig {
    /// `{name}.{root_domain}`
    #[must_use]
    pub fn full_domain(&self, name: &str) -> String {
        format!("{name}.{}", self.root_domain)
    }

    /// `https://{name}.{root_domain}`
    #[must_use]
    pub fn subdomain_url(&self, name: &str) -> String {
        format!("https://{}", self.full_domain(name))
    }

    /// `{web_root}/{name}.{root_domain}`
    #[must_use]
    pub fn directory_path(&self, name: &str) -> PathBuf {
        self.web_root.join(self.full_domain(name))
    }

    /// Document root passed to the hosting panel, relative to the account
    /// home: `public_html/{name}.{root_domain}`.
    #[must_use]
    pub fn document_root(&self, name: &str) -> String {
        format!("public_html/{}", self.full_domain(name))
    }

    /// `{db_prefix}_{name}` with everything outside `[a-z0-9_]` stripped,
    /// truncated to the MySQL 64-char limit.
    #[must_use]
    pub fn database_name(&self, name: &str) -> String {
        let sanitized: String = name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
            .collect();
        let mut db_name = format!("{}_{sanitized}", self.db_prefix);
        db_name.truncate(MAX_DATABASE_NAME_LEN);
        db_name
    }

    /// Guard handed to destructive filesystem operations.
    #[must_use]
    pub fn web_root_guard(&self) -> WebRootGuard {
        WebRootGuard::new(&self.web_root, &self.root_domain)
    }

    /// The directory tree laid out for a new subdomain.
    #[must_use]
    pub fn directory_layout(&self, name: &str) -> Vec<PathBuf> {
        let base = self.directory_path(name);
        [
            "",
            "tools",
            "lms",
            "assets",
            "assets/css",
            "assets/js",
            "assets/images",
        ]
        .iter()
        .map(|rel| {
            if rel.is_empty() {
                base.clone()
            } else {
                base.join(Path::new(rel))
            }
        })
        .collect()
    }
}
