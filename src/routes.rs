//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`         - Landing page with the submission form
//! - `GET  /health`   - Health check: storage and cache
//! - `/api/*`         - Shortening API
//! - `/public/*`      - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin may call the API
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, index_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `public_dir` - directory served under `/public`
pub fn build_router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .nest_service("/public", ServeDir::new(public_dir))
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}

/// Router wrapped so `/api/shorturl/` and `/api/shorturl` are the same route.
pub fn app_router(state: AppState, public_dir: impl AsRef<Path>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, public_dir))
}
