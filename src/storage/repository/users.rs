// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User account repository.
//!
//! Accounts live under `users/{user_id}.json`. A second collection,
//! `user_emails/`, maps each registered email to its account id and is what
//! makes email uniqueness hold under concurrent signups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{is_document_id, DocumentStore, StorageError, StorageResult};

/// User account stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    /// Unique user identifier (UUID)
    pub id: String,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string. Never leaves the server.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Email index entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmailIndexEntry {
    user_id: String,
}

/// Repository for user account operations.
pub struct UserRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Get a user by ID, or `None` if absent.
    pub fn find_by_id(&self, user_id: &str) -> StorageResult<Option<StoredUser>> {
        if !is_document_id(user_id) {
            return Ok(None);
        }
        self.storage
            .read_json_opt(self.storage.paths().user(user_id))
    }

    /// Look up a user by exact email.
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>> {
        let entry: Option<EmailIndexEntry> = self
            .storage
            .read_json_opt(self.storage.paths().user_email(email))?;

        match entry {
            Some(entry) => self.find_by_id(&entry.user_id),
            None => Ok(None),
        }
    }

    /// Persist a new account.
    ///
    /// The account document is written first and the email index entry is
    /// claimed last, so an index entry always points at a complete account.
    /// If another account already holds the email, the new document is
    /// removed and the call fails with `AlreadyExists`.
    pub fn create(&self, user: &StoredUser) -> StorageResult<()> {
        let user_path = self.storage.paths().user(&user.id);
        self.storage.write_json(&user_path, user)?;

        let entry = EmailIndexEntry {
            user_id: user.id.clone(),
        };
        let claimed = self
            .storage
            .create_json(self.storage.paths().user_email(&user.email), &entry);

        if let Err(e) = claimed {
            let _ = self.storage.delete(&user_path);
            return Err(match e {
                StorageError::AlreadyExists(_) => {
                    StorageError::AlreadyExists(format!("User with email {}", user.email))
                }
                other => other,
            });
        }

        Ok(())
    }
}
