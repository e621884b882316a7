//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Longest URL accepted for shortening.
pub const MAX_URL_LENGTH: u64 = 2048;

/// Longest custom alias accepted before hashing.
pub const MAX_ALIAS_LENGTH: u64 = 256;

/// Request to shorten a URL.
///
/// A missing `originalUrl` deserializes to an empty string and is rejected as
/// an invalid URL by the service.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(max = MAX_URL_LENGTH))]
    pub original_url: String,

    /// Optional alias; hashed into the short code rather than used verbatim.
    #[validate(length(max = MAX_ALIAS_LENGTH))]
    pub custom_short: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request: ShortenRequest = serde_json::from_str(
            r#"{"originalUrl": "https://example.com", "customShort": "mycustom12"}"#,
        )
        .unwrap();

        assert_eq!(request.original_url, "https://example.com");
        assert_eq!(request.custom_short.as_deref(), Some("mycustom12"));
    }

    #[test]
    fn test_missing_original_url_defaults_to_empty() {
        let request: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert!(request.original_url.is_empty());
        assert!(request.custom_short.is_none());
    }

    #[test]
    fn test_non_string_url_is_rejected() {
        assert!(serde_json::from_str::<ShortenRequest>(r#"{"originalUrl": 42}"#).is_err());
    }

    #[test]
    fn test_alias_length_limit() {
        let request = ShortenRequest {
            original_url: "https://example.com".to_string(),
            custom_short: Some("a".repeat(MAX_ALIAS_LENGTH as usize + 1)),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("custom_short"));
    }

    #[test]
    fn test_response_serializes_short_url() {
        let response = ShortenResponse {
            short_url: "http://localhost:3000/JS1bc1xPt6".to_string(),
        };
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            serde_json::json!({ "shortUrl": "http://localhost:3000/JS1bc1xPt6" })
        );
    }
}
