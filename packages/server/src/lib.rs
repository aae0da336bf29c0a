pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod llm;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PDF Chat API",
        version = "1.0.0",
        description = "Upload PDFs and ask questions about their text"
    ),
    tags(
        (name = "Documents", description = "PDF upload, replacement and removal"),
        (name = "Chat", description = "Questions answered from a document and its history"),
        (name = "System", description = "Diagnostics"),
    ),
)]
struct ApiDoc;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = if origins.is_empty() || config.allow_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    };

    layer
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let mut api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&state.config));
    if state.config.logging.debug {
        api_router = api_router.routes(routes!(handlers::system::debug_info));
    }
    let (router, api) = api_router.split_for_parts();

    let cors = cors_layer(&state.config.server.cors);
    router
        .with_state(state)
        .merge(Scalar::with_url("/scalar", api))
        .fallback(handlers::system::route_not_found)
        .layer(cors)
}
