// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the document store layout.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Default directory for persistent storage when `DATA_DIR` is unset.
pub const DATA_ROOT: &str = "./data";

/// Storage path utilities for the document store.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    /// Create a new StoragePaths rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    /// Directory containing all user accounts.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific user account document.
    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    /// Directory holding the email → user id index.
    pub fn user_emails_dir(&self) -> PathBuf {
        self.root.join("user_emails")
    }

    /// Index document for an email address.
    ///
    /// Emails are hashed so that arbitrary input never becomes a path
    /// component.
    pub fn user_email(&self, email: &str) -> PathBuf {
        let digest = Sha256::digest(email.as_bytes());
        self.user_emails_dir().join(format!("{digest:x}.json"))
    }

    // ========== Employee Paths ==========

    /// Directory containing all employee records.
    pub fn employees_dir(&self) -> PathBuf {
        self.root.join("employees")
    }

    /// Path to a specific employee record.
    pub fn employee(&self, employee_id: &str) -> PathBuf {
        self.employees_dir().join(format!("{employee_id}.json"))
    }
}
