// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with a secret shared by every process that
//! issues or verifies them. Nothing is stored server-side, so a token stays
//! valid until it expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{claims::TokenClaims, AuthError, AuthenticatedUser};

/// Lifetime of an issued token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service signing with `secret`.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::seconds(TOKEN_TTL_SECS),
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issue a token for `user_id`, expiring one TTL from now.
    pub fn issue(&self, user_id: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            user_id: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::SigningFailed(e.to_string()))
    }

    /// Verify signature and expiry, returning the identity the token encodes.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(AuthenticatedUser::from_claims(token_data.claims))
    }
}
