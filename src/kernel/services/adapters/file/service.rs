//! 文件服务：core 使用的列表、读写与递归复制
//!
//! 具体 I/O 委托给一个 FileProvider（默认本地文件系统）

use super::local::LocalFileProvider;
use crate::kernel::services::ports::file::{FileProvider, Result};
use crate::models::ListingEntry;
use std::path::Path;

pub struct FileService {
    provider: Box<dyn FileProvider>,
}

impl FileService {
    pub fn new() -> Self {
        Self::with_provider(Box::new(LocalFileProvider::new()))
    }

    pub fn with_provider(provider: Box<dyn FileProvider>) -> Self {
        Self { provider }
    }

    /// One directory level as pane entries (no `..`, unsorted).
    pub fn list(&self, path: &Path) -> Result<Vec<ListingEntry>> {
        Ok(self
            .provider
            .read_dir(path)?
            .into_iter()
            .map(ListingEntry::from)
            .collect())
    }

    pub fn read_file_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        self.provider.read_file_bytes(path)
    }

    pub fn write_file_bytes(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.provider.write_file_bytes(path, content)
    }

    pub fn copy_recursive(&self, from: &Path, to: &Path) -> Result<()> {
        self.provider.copy_recursive(from, to)
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/service.rs"]
mod tests;
