//! Domain layer: entities and the store contract.
//!
//! - [`entities`] - Short codes and URL mappings
//! - [`repositories`] - The [`repositories::UrlStore`] trait implemented by
//!   the infrastructure layer
//!
//! Nothing here depends on the HTTP layer or on a concrete store backend.

pub mod entities;
pub mod repositories;
