// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # GraphQL Schema
//!
//! All client operations go through one schema:
//!
//! | Operation | Kind | Token |
//! |-----------|------|-------|
//! | `login` | query | no |
//! | `getEmployees` | query | yes |
//! | `searchEmployee` | query | yes |
//! | `searchEmployeeByDesignationOrDept` | query | yes |
//! | `signup` | mutation | no |
//! | `addEmployee` | mutation | yes |
//! | `updateEmployee` | mutation | yes |
//! | `deleteEmployee` | mutation | yes |
//!
//! The request context carries an `AuthenticatedUser` only when the
//! authentication gate verified the caller's token. Gated operations call
//! [`require_identity`] before anything else.

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Schema};

use crate::auth::{AuthenticatedUser, TokenService};
use crate::error::ServiceError;
use crate::storage::DocumentStore;

pub mod mutation;
pub mod query;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the store and token service as shared data.
pub fn build_schema(storage: Arc<DocumentStore>, tokens: Arc<TokenService>) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(storage)
        .data(tokens)
        .finish()
}

/// Guard for operations that need a verified caller.
pub fn require_identity<'a>(ctx: &Context<'a>) -> Result<&'a AuthenticatedUser, ServiceError> {
    ctx.data_opt::<AuthenticatedUser>()
        .ok_or(ServiceError::Unauthorized)
}

pub(crate) fn storage<'a>(ctx: &Context<'a>) -> Result<&'a DocumentStore, ServiceError> {
    ctx.data::<Arc<DocumentStore>>()
        .map(|storage| storage.as_ref())
        .map_err(|e| ServiceError::Internal(e.message))
}

pub(crate) fn tokens<'a>(ctx: &Context<'a>) -> Result<&'a TokenService, ServiceError> {
    ctx.data::<Arc<TokenService>>()
        .map(|tokens| tokens.as_ref())
        .map_err(|e| ServiceError::Internal(e.message))
}

/// Convert an operation failure into a GraphQL error, logging server faults.
pub(crate) fn into_graphql_error(err: ServiceError) -> async_graphql::Error {
    if err.is_server_fault() {
        tracing::error!(error = %err, code = err.error_code(), "Operation failed");
    } else {
        tracing::debug!(error = %err, code = err.error_code(), "Operation rejected");
    }
    err.extend()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::storage::StoragePaths;
    use async_graphql::{Request, Response, Value, Variables};
    use tempfile::TempDir;

    pub struct TestSchema {
        pub schema: AppSchema,
        pub tokens: Arc<TokenService>,
        _dir: TempDir,
    }

    impl TestSchema {
        pub fn new() -> Self {
            let dir = TempDir::new().expect("Failed to create temp dir");
            let mut storage = DocumentStore::new(StoragePaths::new(dir.path()));
            storage.initialize().expect("Failed to initialize storage");

            let tokens = Arc::new(TokenService::new("test-secret"));
            let schema = build_schema(Arc::new(storage), tokens.clone());
            Self {
                schema,
                tokens,
                _dir: dir,
            }
        }

        /// Execute as an anonymous caller.
        pub async fn anonymous(&self, query: &str, variables: serde_json::Value) -> Response {
            let request = Request::new(query).variables(Variables::from_json(variables));
            self.schema.execute(request).await
        }

        /// Execute as the given user.
        pub async fn as_user(
            &self,
            user_id: &str,
            query: &str,
            variables: serde_json::Value,
        ) -> Response {
            let user = self
                .tokens
                .verify(&self.tokens.issue(user_id).unwrap())
                .unwrap();
            let request = Request::new(query)
                .variables(Variables::from_json(variables))
                .data(user);
            self.schema.execute(request).await
        }
    }

    /// The `data` of a successful response as JSON.
    pub fn data(response: Response) -> serde_json::Value {
        assert!(
            response.errors.is_empty(),
            "unexpected errors: {:?}",
            response.errors
        );
        response.data.into_json().unwrap()
    }

    /// The `extensions.code` of the first error.
    pub fn error_code(response: &Response) -> String {
        let error = response.errors.first().expect("expected an error");
        let code = error
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .expect("error has a code");
        match code {
            Value::String(code) => code.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use serde_json::json;

    #[test]
    fn schema_exposes_original_operation_names() {
        let sdl = TestSchema::new().schema.sdl();

        for name in [
            "login(",
            "getEmployees",
            "searchEmployee(",
            "searchEmployeeByDesignationOrDept(",
            "signup(",
            "addEmployee(",
            "updateEmployee(",
            "deleteEmployee(",
            "first_name",
            "date_of_joining",
            "employee_photo",
            "created_at",
        ] {
            assert!(sdl.contains(name), "schema is missing {name}");
        }
        assert!(!sdl.contains("password_hash"));
        assert!(!sdl.contains("passwordHash"));
    }

    #[tokio::test]
    async fn signup_login_scenario() {
        let ts = TestSchema::new();

        let signup = ts
            .anonymous(
                r#"mutation($u: String!, $e: String!, $p: String!) {
                    signup(username: $u, email: $e, password: $p)
                }"#,
                json!({"u": "alice", "e": "a@x.com", "p": "p1"}),
            )
            .await;
        let t = data(signup)["signup"].as_str().unwrap().to_string();
        let first = ts.tokens.verify(&t).expect("signup token verifies");

        let wrong = ts
            .anonymous(
                r#"query { login(email: "a@x.com", password: "wrong") }"#,
                json!({}),
            )
            .await;
        assert_eq!(error_code(&wrong), "bad_credentials");
        assert_eq!(wrong.errors[0].message, "Incorrect password");

        let right = ts
            .anonymous(
                r#"query { login(email: "a@x.com", password: "p1") }"#,
                json!({}),
            )
            .await;
        let t2 = data(right)["login"].as_str().unwrap().to_string();
        let second = ts.tokens.verify(&t2).expect("login token verifies");

        assert_eq!(first.user_id, second.user_id);
    }

    #[tokio::test]
    async fn gated_operations_reject_anonymous_callers() {
        let ts = TestSchema::new();
        let id = uuid::Uuid::new_v4().to_string();

        let operations = [
            "query { getEmployees { id } }".to_string(),
            format!(r#"query {{ searchEmployee(id: "{id}") {{ id }} }}"#),
            r#"query { searchEmployeeByDesignationOrDept(designation: "x") { id } }"#
                .to_string(),
            r#"mutation { addEmployee(first_name: "A") { id } }"#.to_string(),
            format!(r#"mutation {{ updateEmployee(id: "{id}", first_name: "B") {{ id }} }}"#),
            format!(r#"mutation {{ deleteEmployee(id: "{id}") {{ id }} }}"#),
        ];

        for op in operations {
            let response = ts.anonymous(&op, json!({})).await;
            assert_eq!(error_code(&response), "unauthorized", "operation {op}");
            assert_eq!(
                response.errors[0].message,
                "Unauthorized access. Token required."
            );
        }
    }
}
