// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Password hashing, session tokens and the request authentication gate.
//!
//! ## Auth Flow
//!
//! 1. `signup` / `login` return a JWT signed with `JWT_SECRET`
//! 2. Clients send `Authorization: Bearer <token>`
//! 3. The gate verifies the token and attaches the decoded identity to the
//!    GraphQL request context, or nothing if verification fails
//! 4. Gated operations reject anonymous callers themselves
//!
//! ## Security
//!
//! - Passwords are stored as argon2id hashes with per-account salts
//! - Tokens expire one hour after issuance; there is no revocation
//! - Any valid token grants access to every gated operation

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod tokens;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use error::AuthError;
pub use extractor::{authenticate, RequestIdentity};
pub use password::{hash_password, verify_password};
pub use tokens::{TokenService, TOKEN_TTL_SECS};
