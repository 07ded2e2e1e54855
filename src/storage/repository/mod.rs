// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the document store.
//!
//! Each repository provides the operations for one entity type, using the
//! DocumentStore for all file operations.

pub mod employees;
pub mod users;

pub use employees::{
    EmployeeField, EmployeePatch, EmployeeRepository, FieldMatch, MatchCondition, NewEmployee,
    StoredEmployee,
};
pub use users::{StoredUser, UserRepository};
