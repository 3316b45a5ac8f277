//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{delete, get},
    Json, Router,
};
use std::sync::Arc;
use stowage_core::Config;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let router = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route(
            "/api/v1/workspaces/{owner_id}/{workspace_id}/download-url",
            get(handlers::download_url::download_url_workspace),
        )
        .route(
            "/api/v1/workspaces/{owner_id}/{workspace_id}",
            delete(handlers::delete_workspace::delete_workspace),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(router)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let origins = config.cors_origins();
    if origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let parsed: Result<Vec<HeaderValue>, _> = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect();
    let parsed = parsed.map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any))
}
