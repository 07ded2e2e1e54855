// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication gate.
//!
//! Runs before every GraphQL request. It never rejects: a missing header
//! yields an anonymous request, and a header that fails verification is
//! logged and also treated as anonymous. Whether anonymous callers may
//! proceed is decided by each operation.
//!
//! ```rust,ignore
//! async fn handler(RequestIdentity(identity): RequestIdentity) {
//!     // identity is Option<AuthenticatedUser>
//! }
//! ```

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
};

use super::{AuthError, AuthenticatedUser, TokenService};
use crate::state::AppState;

/// Identity attached to the current request, if a valid token was presented.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for RequestIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(RequestIdentity(authenticate(
            parts.headers.get(AUTHORIZATION),
            state.tokens(),
        )))
    }
}

/// Extract the token from a `Bearer <token>` header value.
pub fn bearer_token(header: &HeaderValue) -> Result<&str, AuthError> {
    let value = header.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthError::InvalidAuthHeader)?;

    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }
    Ok(token)
}

/// Resolve the caller's identity from an optional `Authorization` header.
pub fn authenticate(header: Option<&HeaderValue>, tokens: &TokenService) -> Option<AuthenticatedUser> {
    let header = header?;

    match bearer_token(header).and_then(|token| tokens.verify(token)) {
        Ok(user) => {
            tracing::debug!(user_id = %user.user_id, "Request authenticated");
            Some(user)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                error_code = e.error_code(),
                "Invalid or expired token, continuing anonymously"
            );
            None
        }
    }
}
