//! 本地文件系统 Provider
//!
//! 实现 FileProvider trait，操作本地文件系统

use crate::kernel::services::ports::file::{DirEntry, FileError, FileProvider, Result};
use std::fs;
use std::path::Path;

pub struct LocalFileProvider;

impl LocalFileProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFileProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProvider for LocalFileProvider {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if !path.is_dir() {
            return Err(if path.exists() {
                FileError::NotADirectory(path.to_path_buf())
            } else {
                FileError::NotFound(path.to_path_buf())
            });
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
            // Follow symlinks so a link to a directory lists as a directory.
            let metadata = match fs::metadata(&path) {
                Ok(m) => m,
                Err(_) => entry.metadata()?,
            };
            let is_dir = metadata.is_dir();

            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path,
                is_dir,
                is_symlink,
                size: if is_dir { 0 } else { metadata.len() },
                modified: metadata.modified().ok(),
            });
        }

        Ok(entries)
    }

    fn read_file_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        Ok(fs::read(path)?)
    }

    fn write_file_bytes(&self, path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(fs::write(path, content)?)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        if path.exists() && !path.is_dir() {
            return Err(FileError::NotADirectory(path.to_path_buf()));
        }
        Ok(fs::create_dir_all(path)?)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        if !from.exists() {
            return Err(FileError::NotFound(from.to_path_buf()));
        }
        if !from.is_file() {
            return Err(FileError::NotAFile(from.to_path_buf()));
        }
        if to.is_dir() {
            return Err(FileError::AlreadyExists(to.to_path_buf()));
        }
        fs::copy(from, to)?;
        // Copies carry the source mtime.
        if let Ok(modified) = fs::metadata(from).and_then(|m| m.modified()) {
            fs::File::options()
                .write(true)
                .open(to)?
                .set_modified(modified)?;
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/local.rs"]
mod tests;
