// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod graphql;
pub mod health;

use graphql::GRAPHQL_PATH;
use health::{HealthChecks, HealthResponse, ReadyResponse};

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(health::root))
        .route(
            GRAPHQL_PATH,
            get(graphql::graphiql).post(graphql::graphql_handler),
        )
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    routes
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(schemas(ReadyResponse, HealthChecks, HealthResponse)),
    tags(
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
