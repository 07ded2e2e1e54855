// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Query operations.

use async_graphql::{Context, MaybeUndefined, Object, Result, ID};

use super::{into_graphql_error, require_identity, storage, tokens};
use crate::auth::verify_password;
use crate::error::ServiceError;
use crate::storage::{EmployeeField, EmployeeRepository, FieldMatch, StoredEmployee, UserRepository};

#[derive(Default)]
pub struct QueryRoot;

#[Object(rename_args = "snake_case")]
impl QueryRoot {
    /// Exchange an email and password for a session token.
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<String> {
        login_user(ctx, email, password)
            .await
            .map_err(into_graphql_error)
    }

    /// All employee records.
    async fn get_employees(&self, ctx: &Context<'_>) -> Result<Vec<StoredEmployee>> {
        list_employees(ctx).map_err(into_graphql_error)
    }

    /// A single employee record, or null if no record has this id.
    async fn search_employee(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> Result<Option<StoredEmployee>> {
        find_employee(ctx, id).map_err(into_graphql_error)
    }

    /// Records whose designation or department matches.
    ///
    /// An omitted filter matches every record, so leaving either argument out
    /// returns the whole collection. An explicit null matches records where
    /// that field is unset.
    async fn search_employee_by_designation_or_dept(
        &self,
        ctx: &Context<'_>,
        designation: MaybeUndefined<String>,
        department: MaybeUndefined<String>,
    ) -> Result<Vec<StoredEmployee>> {
        search_by_designation_or_department(ctx, &designation, &department)
            .map_err(into_graphql_error)
    }
}

async fn login_user(
    ctx: &Context<'_>,
    email: String,
    password: String,
) -> Result<String, ServiceError> {
    let user = UserRepository::new(storage(ctx)?)
        .find_by_email(&email)?
        .ok_or(ServiceError::NotFound("User"))?;

    let hash = user.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ServiceError::Internal(format!("password check aborted: {e}")))?;

    if !matches {
        tracing::info!(user_id = %user.id, "Login rejected: incorrect password");
        return Err(ServiceError::BadCredentials);
    }

    let token = tokens(ctx)?.issue(&user.id)?;
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(token)
}

fn list_employees(ctx: &Context<'_>) -> Result<Vec<StoredEmployee>, ServiceError> {
    require_identity(ctx)?;
    Ok(EmployeeRepository::new(storage(ctx)?).find_all()?)
}

fn find_employee(ctx: &Context<'_>, id: Option<ID>) -> Result<Option<StoredEmployee>, ServiceError> {
    require_identity(ctx)?;
    let Some(id) = id else {
        return Ok(None);
    };
    Ok(EmployeeRepository::new(storage(ctx)?).find_by_id(&id)?)
}

fn search_by_designation_or_department(
    ctx: &Context<'_>,
    designation: &MaybeUndefined<String>,
    department: &MaybeUndefined<String>,
) -> Result<Vec<StoredEmployee>, ServiceError> {
    require_identity(ctx)?;
    let filters = [
        FieldMatch::new(EmployeeField::Designation, designation),
        FieldMatch::new(EmployeeField::Department, department),
    ];
    Ok(EmployeeRepository::new(storage(ctx)?).find_by_filter_or(&filters)?)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use serde_json::json;

    const ADD: &str = r#"mutation($first: String, $designation: String, $department: String) {
        addEmployee(first_name: $first, designation: $designation, department: $department) {
            id
        }
    }"#;

    async fn seed(ts: &TestSchema) {
        for (first, designation, department) in [
            ("Ann", "Engineer", "R&D"),
            ("Ben", "Manager", "Sales"),
            ("Cat", "Clerk", "Finance"),
        ] {
            ts.as_user(
                "seed",
                ADD,
                json!({"first": first, "designation": designation, "department": department}),
            )
            .await;
        }
    }

    fn first_names(value: &serde_json::Value) -> Vec<String> {
        let mut names: Vec<String> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["first_name"].as_str().unwrap().to_string())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn login_unknown_email_is_not_found() {
        let ts = TestSchema::new();

        let response = ts
            .anonymous(
                r#"query { login(email: "nobody@x.com", password: "p") }"#,
                json!({}),
            )
            .await;
        assert_eq!(error_code(&response), "not_found");
        assert_eq!(response.errors[0].message, "User not found");
    }

    #[tokio::test]
    async fn get_employees_lists_everything() {
        let ts = TestSchema::new();
        seed(&ts).await;

        let response = ts
            .as_user("u1", "query { getEmployees { first_name } }", json!({}))
            .await;
        let data = data(response);
        assert_eq!(first_names(&data["getEmployees"]), vec!["Ann", "Ben", "Cat"]);
    }

    #[tokio::test]
    async fn search_employee_returns_null_for_unknown_or_missing_id() {
        let ts = TestSchema::new();
        let unknown = uuid::Uuid::new_v4().to_string();

        let response = ts
            .as_user(
                "u1",
                "query($id: ID) { searchEmployee(id: $id) { id } }",
                json!({ "id": unknown }),
            )
            .await;
        assert_eq!(data(response)["searchEmployee"], json!(null));

        let response = ts
            .as_user(
                "u1",
                "query($id: ID) { searchEmployee(id: $id) { id } }",
                json!({ "id": null }),
            )
            .await;
        assert_eq!(data(response)["searchEmployee"], json!(null));
    }

    #[tokio::test]
    async fn search_by_designation_or_department_is_an_or() {
        let ts = TestSchema::new();
        seed(&ts).await;

        let response = ts
            .as_user(
                "u1",
                r#"query {
                    searchEmployeeByDesignationOrDept(designation: "Engineer", department: "Sales") {
                        first_name
                    }
                }"#,
                json!({}),
            )
            .await;
        let data = data(response);
        assert_eq!(
            first_names(&data["searchEmployeeByDesignationOrDept"]),
            vec!["Ann", "Ben"]
        );
    }

    #[tokio::test]
    async fn search_with_no_filters_returns_every_record() {
        // Omitted filters are match-all conditions; this pins that behavior.
        let ts = TestSchema::new();
        seed(&ts).await;

        let response = ts
            .as_user(
                "u1",
                "query { searchEmployeeByDesignationOrDept { first_name } }",
                json!({}),
            )
            .await;
        let data = data(response);
        assert_eq!(
            first_names(&data["searchEmployeeByDesignationOrDept"]),
            vec!["Ann", "Ben", "Cat"]
        );
    }

    #[tokio::test]
    async fn search_with_null_filter_matches_unset_field() {
        let ts = TestSchema::new();
        seed(&ts).await;
        ts.as_user(
            "seed",
            ADD,
            json!({"first": "Dan", "designation": null, "department": "Legal"}),
        )
        .await;

        let response = ts
            .as_user(
                "u1",
                r#"query {
                    searchEmployeeByDesignationOrDept(designation: null, department: "Sales") {
                        first_name
                    }
                }"#,
                json!({}),
            )
            .await;
        let data = data(response);
        assert_eq!(
            first_names(&data["searchEmployeeByDesignationOrDept"]),
            vec!["Ben", "Dan"]
        );
    }

    #[tokio::test]
    async fn search_with_no_matches_is_empty() {
        let ts = TestSchema::new();
        seed(&ts).await;

        let response = ts
            .as_user(
                "u1",
                r#"query {
                    searchEmployeeByDesignationOrDept(designation: "CEO", department: "Legal") {
                        first_name
                    }
                }"#,
                json!({}),
            )
            .await;
        assert_eq!(data(response)["searchEmployeeByDesignationOrDept"], json!([]));
    }
}
