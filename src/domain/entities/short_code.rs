//! Short code value type.

use std::fmt;

/// A fixed-length, URL-safe token identifying a stored URL mapping.
///
/// Codes are derived from a SHA-256 digest (see
/// [`crate::utils::code_generator`]), never drawn at random, so two inputs can
/// produce the same code. Uniqueness is enforced by the store, not by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Number of characters in every generated code.
    pub const LENGTH: usize = 10;

    pub(crate) fn new(code: String) -> Self {
        debug_assert_eq!(code.len(), Self::LENGTH);
        Self(code)
    }

    /// Returns true if `candidate` has the length and alphabet of a generated code.
    pub fn is_well_formed(candidate: &str) -> bool {
        candidate.len() == Self::LENGTH
            && candidate
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
