// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Employee Directory - GraphQL employee records service
//!
//! A single GraphQL endpoint over a JSON document store. Account signup and
//! login issue short-lived bearer tokens; every employee operation requires
//! one.
//!
//! ## Modules
//!
//! - `api` - HTTP routes (Axum): GraphQL endpoint, health probes, docs
//! - `auth` - Password hashing, session tokens, request identity
//! - `config` - Environment-driven runtime configuration
//! - `error` - Operation error taxonomy exposed to GraphQL clients
//! - `graphql` - Schema, queries and mutations
//! - `storage` - File-backed document store and repositories

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod graphql;
pub mod state;
pub mod storage;
