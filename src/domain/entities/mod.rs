//! Domain entities.
//!
//! - [`ShortCode`] - Fixed-length token derived from a hash
//! - [`UrlMapping`] - Persisted short code to original URL association

pub mod short_code;
pub mod url_mapping;

pub use short_code::ShortCode;
pub use url_mapping::{UrlMapping, decode_stored_url, encode_stored_url};
