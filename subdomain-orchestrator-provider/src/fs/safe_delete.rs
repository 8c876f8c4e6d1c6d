//! Safe recursive deletion primitive.
//!
//! The only code path in the workspace allowed to remove directory trees.
//! Every invariant is checked against the canonicalized path before any
//! mutation; a violation refuses the whole operation, never a partial delete.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ProviderError, Result};
use crate::types::WebRootGuard;

/// Safely delete the directory tree at `path`.
///
/// Checks, in order, each independently fatal:
/// 1. `path` resolves to a real, existing filesystem location;
/// 2. the resolved path is a descendant of the canonicalized web root
///    (component-wise prefix match, so a sibling like `/srv/www-old` never
///    passes for root `/srv/www`);
/// 3. the resolved path contains `.{domain_suffix}` as a substring;
/// 4. the resolved path is not the web root itself.
///
/// On success, removal is strictly post-order (children before parents),
/// finishing with the path itself. Returns the canonical path that was
/// deleted.
pub fn safe_remove_tree(path: &Path, guard: &WebRootGuard) -> Result<PathBuf> {
    let canonical = fs::canonicalize(path).map_err(|_| {
        log::warn!("Directory does not exist: {}", path.display());
        ProviderError::DirectoryNotFound {
            path: path.display().to_string(),
        }
    })?;

    let web_root = fs::canonicalize(&guard.web_root).map_err(|e| {
        log::error!(
            "SECURITY: configured web root does not resolve: {}: {e}",
            guard.web_root.display()
        );
        ProviderError::SecurityViolation {
            path: guard.web_root.display().to_string(),
            detail: "configured web root does not resolve".to_string(),
        }
    })?;

    if !canonical.starts_with(&web_root) {
        log::error!(
            "SECURITY: attempted to delete path outside web root: {}",
            canonical.display()
        );
        return Err(ProviderError::SecurityViolation {
            path: canonical.display().to_string(),
            detail: "path outside web root".to_string(),
        });
    }

    let suffix = format!(".{}", guard.domain_suffix);
    if !canonical.to_string_lossy().contains(&suffix) {
        log::error!(
            "SECURITY: attempted to delete path without {suffix}: {}",
            canonical.display()
        );
        return Err(ProviderError::SecurityViolation {
            path: canonical.display().to_string(),
            detail: format!("path does not contain {suffix}"),
        });
    }

    if canonical == web_root {
        log::error!("SECURITY: attempted to delete web root itself");
        return Err(ProviderError::SecurityViolation {
            path: canonical.display().to_string(),
            detail: "refusing to delete web root".to_string(),
        });
    }

    remove_post_order(&canonical)?;

    log::info!("Directory deleted: {}", canonical.display());
    Ok(canonical)
}

/// Remove all children of `path` before removing `path` itself, so no
/// non-empty-directory error can occur mid-walk.
fn remove_post_order(path: &Path) -> Result<()> {
    let entries = fs::read_dir(path).map_err(|e| io_error(path, &e))?;

    for entry in entries {
        let entry = entry.map_err(|e| io_error(path, &e))?;
        let child = entry.path();
        // Symlinks are removed as entries, never followed.
        let file_type = entry.file_type().map_err(|e| io_error(&child, &e))?;
        if file_type.is_dir() {
            remove_post_order(&child)?;
        } else {
            fs::remove_file(&child).map_err(|e| io_error(&child, &e))?;
        }
    }

    fs::remove_dir(path).map_err(|e| io_error(path, &e))
}

fn io_error(path: &Path, e: &std::io::Error) -> ProviderError {
    ProviderError::Filesystem {
        path: path.display().to_string(),
        detail: e.to_string(),
    }
}
