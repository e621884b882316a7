//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /api/shorten` - Create a short URL
//! - `GET  /api/{code}`  - Redirect to the original URL
//! - `GET  /{code}`      - Same redirect, matching the returned `shortUrl`
//! - `GET  /health`      - Store health check
//! - anything else       - `404 {"error": "unknown endpoint"}`, including
//!   unsupported methods on the paths above
//!
//! Requests are traced by [`crate::api::middleware::tracing`]. Trailing
//! slashes are trimmed by the server before routing.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, unknown_endpoint_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .fallback(unknown_endpoint_handler)
        .method_not_allowed_fallback(unknown_endpoint_handler)
        .with_state(state)
        .layer(tracing::layer())
}
