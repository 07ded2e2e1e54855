// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON document store on the local filesystem.
//!
//! Every document is a single pretty-printed JSON file named after its id,
//! grouped into one directory per collection. Replacing a document writes a
//! temp file and renames it over the old one, so concurrent readers observe
//! either the previous or the next version, never a partial write.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use super::StoragePaths;

/// Error type for document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(io::Error),
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Document not found
    #[error("Not found: {0}")]
    NotFound(String),
    /// Document already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    /// Storage not initialized
    #[error("Storage not initialized")]
    NotInitialized,
    /// Health check read back different bytes than it wrote
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(e.to_string()),
            _ => StorageError::Io(e),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Returns true if `id` has the shape of a server-assigned document id.
///
/// Ids arrive from clients and end up in file names, so anything that is not
/// a UUID is rejected before touching the filesystem.
pub fn is_document_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

/// Filesystem-backed document store.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    paths: StoragePaths,
    initialized: bool,
}

impl DocumentStore {
    /// Create a new DocumentStore instance.
    ///
    /// Does NOT initialize the directory structure. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
        }
    }

    /// Get the storage paths.
    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Check if storage is initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Initialize the collection directories.
    ///
    /// Safe to call multiple times (idempotent).
    pub fn initialize(&mut self) -> StorageResult<()> {
        let dirs = [
            self.paths.users_dir(),
            self.paths.user_emails_dir(),
            self.paths.employees_dir(),
        ];

        for dir in dirs {
            fs::create_dir_all(&dir)?;
        }

        self.initialized = true;
        Ok(())
    }

    /// Check that the store root is writable and reads back what was written.
    pub fn health_check(&self) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let test_file = self
            .paths
            .root()
            .join(format!(".health_check-{}", Uuid::new_v4()));
        let test_data = b"health_check_data";

        fs::write(&test_file, test_data)?;
        let read_data = fs::read(&test_file)?;
        fs::remove_file(&test_file)?;

        if read_data != test_data {
            return Err(StorageError::IntegrityViolation(
                "Health check data mismatch".to_string(),
            ));
        }

        Ok(())
    }

    // ========== Generic JSON Operations ==========

    /// Read a JSON document and deserialize it.
    pub fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> StorageResult<T> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let value = serde_json::from_reader(reader)?;
        Ok(value)
    }

    /// Read a JSON document, returning `None` if it does not exist.
    pub fn read_json_opt<T: DeserializeOwned>(
        &self,
        path: impl AsRef<Path>,
    ) -> StorageResult<Option<T>> {
        match self.read_json(path) {
            Ok(value) => Ok(Some(value)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write a JSON document, replacing any previous version (atomic via rename).
    pub fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.write_temp(path, value)?;
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// Write a JSON document only if none exists at `path`.
    ///
    /// The document is fully written to a temp file and then published with
    /// a hard link, which fails if `path` exists. Of two racing callers
    /// exactly one succeeds and the other gets `AlreadyExists`; readers never
    /// see a partially written document.
    pub fn create_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.write_temp(path, value)?;
        let published = fs::hard_link(&temp_path, path);
        let _ = fs::remove_file(&temp_path);
        published?;
        Ok(())
    }

    /// Serialize `value` into a uniquely named sibling of `path`.
    fn write_temp<T: Serialize>(&self, path: &Path, value: &T) -> StorageResult<PathBuf> {
        // Unique temp name so concurrent writers to the same document don't
        // clobber each other's temp file.
        let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        let written = File::create(&temp_path)
            .map_err(StorageError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                serde_json::to_writer_pretty(&mut writer, value)?;
                writer.flush()?;
                Ok(())
            });

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        Ok(temp_path)
    }

    /// Delete a document.
    pub fn delete(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }
        fs::remove_file(path.as_ref())?;
        Ok(())
    }

    /// List the ids (file stems) of all documents in a collection directory.
    pub fn list_files(&self, dir: impl AsRef<Path>, extension: &str) -> StorageResult<Vec<String>> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != extension) {
                continue;
            }
            if let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }
}
