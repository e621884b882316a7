//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;
use url::Url;

use crate::domain::repositories::StoreError;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /api/{code}` and `GET /{code}`
///
/// # Response
///
/// `302 Found` with `Location` set to the decoded original URL. URLs that are
/// not valid header values as-is (e.g. raw non-ASCII characters) are sent in
/// their serialized, percent-encoded form.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    redirect_to(&state, &code).await
}

/// `GET /api/shorten`.
///
/// The `/shorten` path is taken by the POST route, so a GET on it is looked
/// up as the code `shorten` here instead of by [`redirect_handler`].
pub async fn shorten_path_redirect_handler(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    redirect_to(&state, "shorten").await
}

async fn redirect_to(state: &AppState, code: &str) -> Result<Response, AppError> {
    let original_url = state.shortener.resolve_short_code(code).await?;
    let location = location_header(&original_url)?;

    debug!(code = %code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

fn location_header(original_url: &str) -> Result<HeaderValue, AppError> {
    // `HeaderValue` tolerates raw obs-text bytes; clients expect ASCII.
    if original_url.is_ascii()
        && let Ok(value) = HeaderValue::from_str(original_url)
    {
        return Ok(value);
    }

    Url::parse(original_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            AppError::from(StoreError::InvalidData(format!(
                "stored URL cannot be used as a Location header: {original_url:?}"
            )))
        })
}
