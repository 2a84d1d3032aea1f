//! Route definitions and router construction.
//!
//! This module defines the HTTP routes and creates the main router.
//! Handlers delegate to the shared `AppCore` facade.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig, ServerConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build all API routes without `/api` prefix (for nesting under /api).
///
/// `/profile/me` is a literal segment and always wins over `/profile/{id}`.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(handlers::profiles::list).post(handlers::profiles::create),
        )
        .route("/profile/me", get(handlers::profiles::me))
        .route(
            "/profile/{id}",
            get(handlers::profiles::get)
                .put(handlers::profiles::update)
                .delete(handlers::profiles::remove),
        )
        .route("/profile/{id}/history", get(handlers::history::list))
        .route("/profile/{id}/details", get(handlers::profiles::details))
}

/// Create the main router with API routes.
pub fn create_router(ctx: AxumContext, config: &ServerConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(&config.cors);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
