//! Mapping between a short code and the original URL.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::str::Utf8Error;

use super::ShortCode;

/// Characters left untouched when a URL is written to the store.
///
/// Matches the unreserved set of `encodeURIComponent`, so stored values never
/// carry control characters or separators.
const STORED_URL_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A persisted `ShortCode -> OriginalUrl` association.
///
/// Mappings are immutable once written: there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub code: ShortCode,
    pub original_url: String,
}

impl UrlMapping {
    pub fn new(code: ShortCode, original_url: impl Into<String>) -> Self {
        Self {
            code,
            original_url: original_url.into(),
        }
    }

    /// Value written to the store for this mapping.
    pub fn stored_value(&self) -> String {
        encode_stored_url(&self.original_url)
    }
}

/// Percent-encodes a URL for storage.
pub fn encode_stored_url(url: &str) -> String {
    utf8_percent_encode(url, STORED_URL_SET).to_string()
}

/// Reverses [`encode_stored_url`].
///
/// # Errors
///
/// Returns an error if the decoded bytes are not valid UTF-8.
pub fn decode_stored_url(stored: &str) -> Result<String, Utf8Error> {
    percent_decode_str(stored)
        .decode_utf8()
        .map(|url| url.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_escapes_separators() {
        assert_eq!(
            encode_stored_url("http://www.lighthouselabs.ca"),
            "http%3A%2F%2Fwww.lighthouselabs.ca"
        );
    }

    #[test]
    fn test_encode_keeps_unreserved_marks() {
        assert_eq!(encode_stored_url("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
    }

    #[test]
    fn test_encode_escapes_query_and_spaces() {
        assert_eq!(
            encode_stored_url("https://x.io/?q=a b&r=1"),
            "https%3A%2F%2Fx.io%2F%3Fq%3Da%20b%26r%3D1"
        );
    }

    #[test]
    fn test_decode_restores_original() {
        let url = "https://example.com/path?q=ünïcode&x=1#frag";
        assert_eq!(decode_stored_url(&encode_stored_url(url)).unwrap(), url);
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(decode_stored_url("%FF%FE").is_err());
    }

    #[test]
    fn test_stored_value_uses_encoding() {
        let mapping = UrlMapping::new(
            ShortCode::new("abcdefghij".to_string()),
            "https://example.com/a b",
        );
        assert_eq!(mapping.stored_value(), "https%3A%2F%2Fexample.com%2Fa%20b");
    }
}
