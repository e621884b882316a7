//! Application error taxonomy and its HTTP rendering.
//!
//! Every variant renders as `{"error": "<message>"}` with a fixed public
//! message; internal details stay in the logs.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};

use crate::domain::entities::ShortCode;
use crate::domain::repositories::StoreError;

/// JSON error envelope returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Submitted URL is not an absolute http(s) URI.
    #[error("invalid URL: {reason}")]
    InvalidUrl { reason: String },

    /// Custom alias failed input checks.
    #[error("invalid custom alias: {reason}")]
    InvalidAlias { reason: String },

    /// The hash of the requested custom alias is already mapped.
    #[error("custom alias already in use: {code}")]
    AliasTaken { code: ShortCode },

    /// Primary and every salted candidate collided.
    #[error("short code collisions exhausted after {attempts} salted attempts")]
    CollisionExhausted { attempts: u32 },

    /// The store failed for transport or data reasons.
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    /// No mapping exists for the requested code.
    #[error("short code not found: {code}")]
    NotFound { code: String },

    /// Request body could not be extracted.
    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. }
            | Self::InvalidAlias { .. }
            | Self::AliasTaken { .. }
            | Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::CollisionExhausted { .. } | Self::StoreUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message exposed in the response body.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "Invalid URL",
            Self::InvalidAlias { .. } => "Invalid custom short URL",
            Self::AliasTaken { .. } => "Custom short URL already in use",
            Self::NotFound { .. } => "Short URL not found",
            Self::MalformedRequest(_) => "TypeError",
            Self::CollisionExhausted { .. } | Self::StoreUnavailable(_) => {
                "Internal server error"
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(error = %self, "Request rejected");
        }

        (status, Json(ErrorBody::new(self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::code_generator::deterministic_hash;

    #[test]
    fn test_client_errors_map_to_400() {
        let errors = [
            AppError::InvalidUrl {
                reason: "no scheme".to_string(),
            },
            AppError::InvalidAlias {
                reason: "too long".to_string(),
            },
            AppError::AliasTaken {
                code: deterministic_hash(b"foo"),
            },
            AppError::MalformedRequest("bad json".to_string()),
        ];

        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{err}");
        }
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::NotFound {
            code: "missing".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Short URL not found");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let exhausted = AppError::CollisionExhausted { attempts: 3 };
        let store = AppError::from(StoreError::Timeout("GET".to_string()));

        assert_eq!(exhausted.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(exhausted.public_message(), "Internal server error");
        assert_eq!(store.public_message(), "Internal server error");
    }

    #[test]
    fn test_into_response_sets_status() {
        let response = AppError::InvalidUrl {
            reason: "x".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
