//! cPanel UAPI response types.

use serde::Deserialize;

/// Standard cPanel UAPI envelope: `status` is 1 on success, `errors` carries
/// human-readable failure strings.
#[derive(Debug, Deserialize)]
pub(crate) struct CpanelResponse<T> {
    pub status: i64,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubdomainEntry {
    pub domain: String,
}

/// `Mysql/list_databases` has returned both bare strings and objects across
/// cPanel versions; accept either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DatabaseEntry {
    Name(String),
    Detailed { database: String },
}

impl DatabaseEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Detailed { database: name } => name,
        }
    }
}
