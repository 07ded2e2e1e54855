// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Operation-level errors.
//!
//! Every failure of a GraphQL operation is a `ServiceError`. It is reported
//! in the response's `errors` array with its message and a stable
//! `extensions.code`.

use async_graphql::ErrorExtensions;

use crate::auth::AuthError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Account or record absent
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Password does not match the stored hash
    #[error("Incorrect password")]
    BadCredentials,

    /// Signup with an email that already has an account
    #[error("Email is already registered.")]
    DuplicateEmail,

    /// Gated operation called without a verified identity
    #[error("Unauthorized access. Token required.")]
    Unauthorized,

    /// Token signature or expiry check failed
    #[error("Invalid or expired token: {0}")]
    InvalidToken(AuthError),

    /// Underlying persistence error
    #[error("Storage failure: {0}")]
    StoreFailure(#[from] StorageError),

    /// Hashing, signing or task failure on our side
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "not_found",
            ServiceError::BadCredentials => "bad_credentials",
            ServiceError::DuplicateEmail => "duplicate_email",
            ServiceError::Unauthorized => "unauthorized",
            ServiceError::InvalidToken(_) => "invalid_token",
            ServiceError::StoreFailure(_) => "store_failure",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    /// Whether the failure is the server's fault rather than the caller's.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, ServiceError::StoreFailure(_) | ServiceError::Internal(_))
    }
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        if e.is_invalid_token() {
            ServiceError::InvalidToken(e)
        } else {
            ServiceError::Internal(e.to_string())
        }
    }
}

impl ErrorExtensions for ServiceError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string())
            .extend_with(|_, ext| ext.set("code", self.error_code()))
    }
}
