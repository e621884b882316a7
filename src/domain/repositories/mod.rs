//! Store trait definitions for the domain layer.
//!
//! The shortener depends only on the [`UrlStore`] contract; concrete backends
//! live in `crate::infrastructure::store`. Mock implementations are
//! auto-generated via `mockall` for unit tests.

pub mod url_store;

pub use url_store::{SetOutcome, StoreError, StoreResult, UrlStore};

#[cfg(test)]
pub use url_store::MockUrlStore;
