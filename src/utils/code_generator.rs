//! Short code generation.
//!
//! Codes are derived, not random: the input bytes are hashed with SHA-256 and
//! the digest is encoded as URL-safe base64 without padding, truncated to
//! [`ShortCode::LENGTH`] characters. Identical input always yields the same
//! code, so collisions are resolved by the caller through
//! [`CodeGenerator::salted_hash`].

use base64::Engine as _;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::entities::ShortCode;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Hashes `input` into a short code.
///
/// Pure and infallible.
///
/// # Examples
///
/// ```ignore
/// let code = deterministic_hash(b"mycustom12");
/// assert_eq!(code.as_str(), "8BW6oJLOzT");
/// ```
pub fn deterministic_hash(input: &[u8]) -> ShortCode {
    let digest = Sha256::digest(input);
    let mut encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(ShortCode::LENGTH);
    ShortCode::new(encoded)
}

/// Encodes `value` in lowercase base 36.
pub fn to_base36(mut value: u64) -> String {
    let mut digits = Vec::with_capacity(13);
    loop {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
        if value == 0 {
            break;
        }
    }
    digits.reverse();
    // Only ASCII digits and lowercase letters are pushed.
    String::from_utf8(digits).unwrap_or_default()
}

/// Produces salted codes used to step around a collision.
///
/// The salt combines the current time with a per-process sequence number.
/// The sequence advances on every call, so two salted codes for the same URL
/// differ even when requested within the same millisecond.
#[derive(Debug)]
pub struct CodeGenerator {
    sequence: AtomicU64,
}

impl CodeGenerator {
    /// Creates a generator whose sequence starts at a random offset.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Creates a generator whose sequence starts at `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            sequence: AtomicU64::new(seed),
        }
    }

    /// Hashes `original_url` salted with the time, the next sequence number,
    /// and `attempt` when it is non-zero.
    pub fn salted_hash(&self, original_url: &str, attempt: u32) -> ShortCode {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);

        let mut combined = String::with_capacity(original_url.len() + 32);
        combined.push_str(original_url);
        combined.push_str(&to_base36(millis));
        combined.push('.');
        combined.push_str(&to_base36(sequence));
        if attempt > 0 {
            combined.push_str(&attempt.to_string());
        }

        deterministic_hash(combined.as_bytes())
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
