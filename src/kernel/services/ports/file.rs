//! 文件系统 Provider trait
//!
//! diff 会话读写、目录列表与同步复制都经由这里

use crate::models::{FileMeta, ListingEntry};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug)]
pub enum FileError {
    Io(io::Error),
    NotFound(PathBuf),
    AlreadyExists(PathBuf),
    NotADirectory(PathBuf),
    NotAFile(PathBuf),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Io(e) => write!(f, "IO error: {}", e),
            FileError::NotFound(p) => write!(f, "Not found: {}", p.display()),
            FileError::AlreadyExists(p) => write!(f, "Already exists: {}", p.display()),
            FileError::NotADirectory(p) => write!(f, "Not a directory: {}", p.display()),
            FileError::NotAFile(p) => write!(f, "Not a file: {}", p.display()),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        FileError::Io(e)
    }
}

#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl DirEntry {
    pub fn new(path: PathBuf, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            path,
            name,
            is_dir,
            is_symlink: false,
            size: 0,
            modified: None,
        }
    }
}

impl From<DirEntry> for ListingEntry {
    fn from(entry: DirEntry) -> Self {
        let meta = if entry.is_dir {
            FileMeta::dir(entry.modified)
        } else {
            FileMeta::file(entry.size, entry.modified)
        };
        ListingEntry::new(entry.name, entry.path, meta)
    }
}

pub trait FileProvider: Send + Sync {
    /// One directory level, unsorted. Links are followed for kind and size, and flagged.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    fn read_file_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Whole-file replace; missing parent directories are created.
    fn write_file_bytes(&self, path: &Path, content: &[u8]) -> Result<()>;

    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Single file copy, overwriting `to`.
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Copies a file, or a whole directory tree, from `from` to `to`. Destination directories
    /// are created and existing files overwritten. Symlinked directories below `from` are
    /// not descended into.
    fn copy_recursive(&self, from: &Path, to: &Path) -> Result<()> {
        if !self.exists(from) {
            return Err(FileError::NotFound(from.to_path_buf()));
        }
        if !self.is_dir(from) {
            if let Some(parent) = to.parent() {
                self.create_dir_all(parent)?;
            }
            return self.copy(from, to);
        }

        self.create_dir_all(to)?;
        for child in self.read_dir(from)? {
            if child.is_symlink && child.is_dir {
                tracing::warn!(path = %child.path.display(), "skipping symlinked directory");
                continue;
            }
            let target = to.join(&child.name);
            self.copy_recursive(&child.path, &target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/file.rs"]
mod tests;
