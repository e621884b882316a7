//! Helpers shared across layers.
//!
//! - [`code_generator`] - Hash-derived short codes and salted retries
//! - [`url_validator`] - Well-formedness checks for submitted URLs

pub mod code_generator;
pub mod url_validator;
