// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenService;
use crate::graphql::{build_schema, AppSchema};
use crate::storage::DocumentStore;

/// Shared, immutable application state.
///
/// Cloning is cheap; every request sees the same store handle, token
/// service and schema.
#[derive(Clone)]
pub struct AppState {
    storage: Arc<DocumentStore>,
    tokens: Arc<TokenService>,
    schema: AppSchema,
}

impl AppState {
    pub fn new(storage: DocumentStore, tokens: TokenService) -> Self {
        let storage = Arc::new(storage);
        let tokens = Arc::new(tokens);
        let schema = build_schema(storage.clone(), tokens.clone());

        Self {
            storage,
            tokens,
            schema,
        }
    }

    pub fn storage(&self) -> &DocumentStore {
        &self.storage
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn schema(&self) -> &AppSchema {
        &self.schema
    }
}
