// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! GraphQL endpoint.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{extract::State, response::Html};

use crate::{auth::RequestIdentity, state::AppState};

/// Path the GraphQL endpoint is mounted on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Execute a GraphQL request.
///
/// The identity resolved by the authentication gate (if any) is attached to
/// the request data, where gated operations look for it.
pub async fn graphql_handler(
    State(state): State<AppState>,
    RequestIdentity(identity): RequestIdentity,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();
    if let Some(user) = identity {
        request = request.data(user);
    }

    state.schema().execute(request).await.into()
}

/// Serve the GraphiQL IDE.
pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
