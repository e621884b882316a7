//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::{Validate, ValidationErrors};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::validate_url;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "customShort": "mycustom12"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "shortUrl": "http://localhost:3000/8BW6oJLOzT" }
/// ```
///
/// # Errors
///
/// - 400 `Invalid URL` if the URL is not an absolute http(s) URI
/// - 400 `Custom short URL already in use` if the alias hash is taken
/// - 400 `TypeError` if the body cannot be parsed
/// - 500 `Internal server error` on store failures or exhausted retries
pub async fn shorten_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload
        .validate()
        .map_err(|errors| map_validation_errors(&payload.original_url, errors))?;

    let code = state
        .shortener
        .shorten_url(&payload.original_url, payload.custom_short.as_deref())
        .await?;

    let short_url = state.shortener.short_url(&state.base_url, &code);

    Ok((StatusCode::CREATED, Json(ShortenResponse { short_url })))
}

/// The URL is checked first, so a bad URL wins over a bad alias.
fn map_validation_errors(original_url: &str, errors: ValidationErrors) -> AppError {
    if let Err(e) = validate_url(original_url) {
        AppError::InvalidUrl {
            reason: e.to_string(),
        }
    } else if errors.field_errors().contains_key("original_url") {
        AppError::InvalidUrl {
            reason: errors.to_string(),
        }
    } else {
        AppError::InvalidAlias {
            reason: errors.to_string(),
        }
    }
}
