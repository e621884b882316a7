//! API route configuration.

use crate::api::handlers::{
    redirect_handler, shorten_handler, shorten_path_redirect_handler, unknown_endpoint_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short URL
/// - `GET  /{code}`  - Redirect to the original URL (`/shorten` included)
///
/// Unsupported methods on these paths answer like unknown endpoints.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shorten",
            post(shorten_handler).get(shorten_path_redirect_handler),
        )
        .route("/{code}", get(redirect_handler))
        .method_not_allowed_fallback(unknown_endpoint_handler)
}
