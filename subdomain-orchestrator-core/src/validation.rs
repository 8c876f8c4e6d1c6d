//! Subdomain name policy.

use crate::error::{CoreError, CoreResult};

/// Names that are never issued as subdomains, regardless of availability.
pub const RESERVED_NAMES: &[&str] = &[
    "www", "mail", "ftp", "admin", "api", "cpanel", "webmail", "webdisk", "whm", "ns1", "ns2",
    "localhost", "autodiscover",
];

const MIN_NAME_LEN: usize = 3;
const MAX_NAME_LEN: usize = 50;

/// Normalize and validate a requested subdomain name.
///
/// Input is lowercased first, so policy checks are case-insensitive. Returns
/// the normalized name on success; all rejections are
/// [`CoreError::ValidationError`] with a caller-facing message. No side
/// effects, no external calls.
pub fn validate_subdomain_name(raw: &str) -> CoreResult<String> {
    let name = raw.trim().to_lowercase();

    if name.is_empty() {
        return Err(CoreError::ValidationError(
            "Subdomain name is required".to_string(),
        ));
    }
    if name.len() < MIN_NAME_LEN || name.len() > MAX_NAME_LEN {
        return Err(CoreError::ValidationError(format!(
            "Subdomain name must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::ValidationError(
            "Subdomain name may only contain letters, numbers, and hyphens".to_string(),
        ));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(CoreError::ValidationError(
            "Subdomain name cannot start or end with a hyphen".to_string(),
        ));
    }
    if RESERVED_NAMES.contains(&name.as_str()) {
        return Err(CoreError::ValidationError(format!(
            "'{name}' is a reserved name"
        )));
    }

    Ok(name)
}
