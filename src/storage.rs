//! Per-company file store for AI knowledge-base documents.
//!
//! Files live on local disk under `<root>/<company_id>/`. Names are reduced
//! to a safe basename before touching the filesystem, so a crafted name can
//! never escape the company directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::domain::types::CompanyId;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid file name")]
    InvalidName,

    #[error("file not found")]
    NotFound,

    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A stored document as listed on the settings page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoredFile {
    pub name: String,
    pub size: u64,
}

/// Handle to the on-disk store rooted at a configured directory.
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn company_dir(&self, company_id: CompanyId) -> PathBuf {
        self.root.join(company_id.get().to_string())
    }

    /// Strips any path components, keeping only a non-empty basename.
    fn sanitize_name(name: &str) -> StorageResult<&str> {
        let name = Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(StorageError::InvalidName)?;
        if name.is_empty() || name.starts_with('.') {
            return Err(StorageError::InvalidName);
        }
        Ok(name)
    }

    /// Moves an uploaded temp file into the company directory.
    pub fn save(
        &self,
        company_id: CompanyId,
        name: &str,
        source: &Path,
    ) -> StorageResult<StoredFile> {
        let name = Self::sanitize_name(name)?;
        let dir = self.company_dir(company_id);
        fs::create_dir_all(&dir)?;

        let target = dir.join(name);
        // Rename fails across filesystems (tempdirs often live on another
        // mount), fall back to copy + remove.
        if fs::rename(source, &target).is_err() {
            fs::copy(source, &target)?;
            let _ = fs::remove_file(source);
        }

        let size = fs::metadata(&target)?.len();
        Ok(StoredFile {
            name: name.to_string(),
            size,
        })
    }

    /// Lists the company's documents sorted by name.
    pub fn list(&self, company_id: CompanyId) -> StorageResult<Vec<StoredFile>> {
        let dir = self.company_dir(company_id);
        if !dir.exists() {
            return Ok(vec![]);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                files.push(StoredFile {
                    name: name.to_string(),
                    size: metadata.len(),
                });
            }
        }
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Removes one document by name.
    pub fn remove(&self, company_id: CompanyId, name: &str) -> StorageResult<()> {
        let name = Self::sanitize_name(name)?;
        let target = self.company_dir(company_id).join(name);
        if !target.is_file() {
            return Err(StorageError::NotFound);
        }
        fs::remove_file(target)?;
        Ok(())
    }
}
