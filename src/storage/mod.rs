// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! Persistent storage as JSON documents on the local filesystem, rooted at
//! `DATA_DIR`.
//!
//! ## Storage Layout
//!
//! ```text
//! $DATA_DIR/
//!   users/
//!     {user_id}.json        # Account (username, email, argon2 hash)
//!   user_emails/
//!     {sha256(email)}.json  # Email → user_id index, created exclusively
//!   employees/
//!     {employee_id}.json    # Employee record
//! ```
//!
//! There are no transactions or caches: every repository call is a direct
//! read or write of one or more documents. Concurrent writers to the same
//! record are last-write-wins.

pub mod document_store;
pub mod paths;
pub mod repository;

pub use document_store::{is_document_id, DocumentStore, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{
    EmployeeField, EmployeePatch, EmployeeRepository, FieldMatch, MatchCondition, NewEmployee,
    StoredEmployee, StoredUser, UserRepository,
};
