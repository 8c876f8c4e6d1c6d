//! Local filesystem client.

mod safe_delete;

pub use safe_delete::safe_remove_tree;

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::FilesystemClient;
use crate::types::WebRootGuard;

/// [`FilesystemClient`] backed by the local filesystem.
///
/// Operations are short-lived directory manipulations; they run inline on the
/// calling task. Destructive operations delegate to [`safe_remove_tree`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn io_error(path: &Path, e: &std::io::Error) -> ProviderError {
    ProviderError::Filesystem {
        path: path.display().to_string(),
        detail: e.to_string(),
    }
}

fn copy_recursively(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| io_error(dst, &e))?;

    let entries = fs::read_dir(src).map_err(|e| io_error(src, &e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_error(src, &e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| io_error(&from, &e))?;
        if file_type.is_dir() {
            copy_recursively(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| io_error(&from, &e))?;
        }
    }

    Ok(())
}

#[async_trait]
impl FilesystemClient for LocalFilesystem {
    async fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    async fn create_tree(&self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            fs::create_dir_all(path).map_err(|e| io_error(path, &e))?;
        }
        Ok(())
    }

    async fn copy_tree(&self, src: &Path, dst: &Path) -> Result<()> {
        if !src.is_dir() {
            return Err(ProviderError::DirectoryNotFound {
                path: src.display().to_string(),
            });
        }
        copy_recursively(src, dst)
    }

    async fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).map_err(|e| io_error(path, &e))
    }

    async fn apply_placeholders(
        &self,
        path: &Path,
        replacements: &[(&str, String)],
    ) -> Result<()> {
        if !path.is_file() {
            // Templates may omit any customizable page.
            log::debug!("Placeholder target not present, skipping: {}", path.display());
            return Ok(());
        }

        let mut contents = fs::read_to_string(path).map_err(|e| io_error(path, &e))?;
        for (key, value) in replacements {
            contents = contents.replace(&format!("{{{{{key}}}}}"), value);
        }
        fs::write(path, contents).map_err(|e| io_error(path, &e))
    }

    async fn delete_tree(&self, path: &Path, guard: &WebRootGuard) -> Result<PathBuf> {
        safe_remove_tree(path, guard)
    }
}
