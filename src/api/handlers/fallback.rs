//! Handler for unmatched routes.

use axum::{Json, http::StatusCode};

use crate::error::ErrorBody;

/// Returns `404 {"error": "unknown endpoint"}` for any unmatched route.
pub async fn unknown_endpoint_handler() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("unknown endpoint")))
}
