//! Well-formedness checks for URLs submitted for shortening.
//!
//! URLs are validated but never rewritten: the stored value must resolve back
//! to exactly what the caller sent.

use url::Url;

/// Reasons a submitted URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL has leading or trailing whitespace or control characters")]
    Untrimmed,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must be absolute with a host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http`/`https` URI with a host.
///
/// # Rules
///
/// 1. **Non-empty** and free of surrounding whitespace/control characters
/// 2. **Parseable** as a URL
/// 3. **Protocol**: only HTTP and HTTPS, written as `scheme://`
/// 4. **Host**: must be present and non-empty
///
/// # Errors
///
/// Returns the first rule violated as a [`UrlValidationError`].
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("http://www.lighthouselabs.ca").is_ok());
/// assert!(validate_url("invalid-url").is_err());
/// assert!(validate_url("ftp://example.com").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.trim_matches(|c: char| c.is_whitespace() || c.is_control()) != input {
        return Err(UrlValidationError::Untrimmed);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    // `Url::parse` accepts `http:example.com`; require the authority marker.
    let after_scheme = &input[url.scheme().len()..];
    if !after_scheme.starts_with("://") {
        return Err(UrlValidationError::MissingHost);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
