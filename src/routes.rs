//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{short_code}` - Short URL redirect (public)
//! - `GET  /health`       - Health check (public)
//! - `/api/*`             - REST API, see [`crate::api::routes`]
//!
//! # Middleware
//!
//! - **Panic capture** - Handler panics become the generic 500 body
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Bearer token on protected routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{panic, rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds every route with its middleware.
///
/// Rate limiting keys on the peer socket address, so it must be disabled when
/// the router is driven without connect info (as in tests).
pub fn build_router(state: AppState, rate_limited: bool) -> Router {
    let mut redirect = Router::new().route("/{short_code}", get(redirect_handler));
    if rate_limited {
        redirect = redirect.layer(rate_limit::layer());
    }

    Router::new()
        .merge(redirect)
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes(state.clone(), rate_limited))
        .with_state(state)
        .layer(tracing::layer())
        .layer(panic::layer())
}

/// Constructs the production router with rate limiting and trailing slash
/// normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, true))
}
