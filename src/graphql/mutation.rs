// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Mutation operations.

use async_graphql::{Context, MaybeUndefined, Object, Result, ID};
use chrono::Utc;
use uuid::Uuid;

use super::{into_graphql_error, require_identity, storage, tokens};
use crate::auth::hash_password;
use crate::error::ServiceError;
use crate::storage::{
    EmployeePatch, EmployeeRepository, NewEmployee, StorageError, StoredEmployee, StoredUser,
    UserRepository,
};

#[derive(Default)]
pub struct MutationRoot;

#[Object(rename_args = "snake_case")]
impl MutationRoot {
    /// Register an account and return a session token for it.
    async fn signup(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
    ) -> Result<String> {
        register_user(ctx, username, email, password)
            .await
            .map_err(into_graphql_error)
    }

    /// Create an employee record.
    #[allow(clippy::too_many_arguments)]
    async fn add_employee(
        &self,
        ctx: &Context<'_>,
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        gender: Option<String>,
        designation: Option<String>,
        salary: Option<f64>,
        date_of_joining: Option<String>,
        department: Option<String>,
        employee_photo: Option<String>,
    ) -> Result<StoredEmployee> {
        let new = NewEmployee {
            first_name,
            last_name,
            email,
            gender,
            designation,
            salary,
            date_of_joining,
            department,
            employee_photo,
        };
        create_employee(ctx, new).map_err(into_graphql_error)
    }

    /// Update the given fields of a record. Returns null if the id is unknown.
    ///
    /// Omitted arguments leave a field untouched; an explicit null clears it.
    #[allow(clippy::too_many_arguments)]
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        first_name: MaybeUndefined<String>,
        last_name: MaybeUndefined<String>,
        email: MaybeUndefined<String>,
        gender: MaybeUndefined<String>,
        designation: MaybeUndefined<String>,
        salary: MaybeUndefined<f64>,
        date_of_joining: MaybeUndefined<String>,
        department: MaybeUndefined<String>,
        employee_photo: MaybeUndefined<String>,
    ) -> Result<Option<StoredEmployee>> {
        let patch = EmployeePatch {
            first_name,
            last_name,
            email,
            gender,
            designation,
            salary,
            date_of_joining,
            department,
            employee_photo,
        };
        patch_employee(ctx, id, patch).map_err(into_graphql_error)
    }

    /// Delete a record and return it. Returns null if the id is unknown.
    async fn delete_employee(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> Result<Option<StoredEmployee>> {
        remove_employee(ctx, id).map_err(into_graphql_error)
    }
}

async fn register_user(
    ctx: &Context<'_>,
    username: String,
    email: String,
    password: String,
) -> Result<String, ServiceError> {
    let users = UserRepository::new(storage(ctx)?);

    if users.find_by_email(&email)?.is_some() {
        return Err(ServiceError::DuplicateEmail);
    }

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ServiceError::Internal(format!("password hashing aborted: {e}")))?
        .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))?;

    let user = StoredUser {
        id: Uuid::new_v4().to_string(),
        username,
        email,
        password_hash,
        created_at: Utc::now(),
    };

    // A concurrent signup may have claimed the email since the check above.
    users.create(&user).map_err(|e| match e {
        StorageError::AlreadyExists(_) => ServiceError::DuplicateEmail,
        other => other.into(),
    })?;
    tracing::info!(user_id = %user.id, "Account created");

    Ok(tokens(ctx)?.issue(&user.id)?)
}

fn create_employee(ctx: &Context<'_>, new: NewEmployee) -> Result<StoredEmployee, ServiceError> {
    let caller = require_identity(ctx)?;
    let employee = EmployeeRepository::new(storage(ctx)?).create(new)?;
    tracing::info!(employee_id = %employee.id, user_id = %caller.user_id, "Employee created");
    Ok(employee)
}

fn patch_employee(
    ctx: &Context<'_>,
    id: Option<ID>,
    patch: EmployeePatch,
) -> Result<Option<StoredEmployee>, ServiceError> {
    let caller = require_identity(ctx)?;
    let Some(id) = id else {
        return Ok(None);
    };

    let updated = EmployeeRepository::new(storage(ctx)?).update_by_id(&id, patch)?;
    if updated.is_some() {
        tracing::info!(employee_id = %id.as_str(), user_id = %caller.user_id, "Employee updated");
    }
    Ok(updated)
}

fn remove_employee(ctx: &Context<'_>, id: Option<ID>) -> Result<Option<StoredEmployee>, ServiceError> {
    let caller = require_identity(ctx)?;
    let Some(id) = id else {
        return Ok(None);
    };

    let removed = EmployeeRepository::new(storage(ctx)?).delete_by_id(&id)?;
    if removed.is_some() {
        tracing::info!(employee_id = %id.as_str(), user_id = %caller.user_id, "Employee deleted");
    }
    Ok(removed)
}
