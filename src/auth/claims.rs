// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
///
/// The user id is serialized as `userId` so tokens stay interchangeable with
/// clients that already decode them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account identifier the token was issued for
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

/// Identity decoded from a verified token.
///
/// This is what the authentication gate attaches to the request context and
/// what gated operations look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    /// Account identifier (`userId` claim)
    pub user_id: String,

    /// Token expiration (Unix timestamp)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Create from verified claims.
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_use_camel_case_user_id() {
        let claims = TokenClaims {
            user_id: "user_123".to_string(),
            iat: 1700000000,
            exp: 1700003600,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], "user_123");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn from_claims_extracts_user_id_and_expiry() {
        let user = AuthenticatedUser::from_claims(TokenClaims {
            user_id: "user_123".to_string(),
            iat: 1700000000,
            exp: 1700003600,
        });
        assert_eq!(user.user_id, "user_123");
        assert_eq!(user.expires_at, 1700003600);
    }
}
