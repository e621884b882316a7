//! Store contract for short code to URL mappings.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a store backend.
///
/// An occupied key is not an error: [`UrlStore::set_if_absent`] reports it as
/// [`SetOutcome::AlreadyExists`].
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store operation timed out: {0}")]
    Timeout(String),

    #[error("store operation failed: {0}")]
    Operation(String),

    #[error("stored value is invalid: {0}")]
    InvalidData(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of an atomic set-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The key was free and now holds the value.
    Created,
    /// The key was already occupied; nothing was written.
    AlreadyExists,
}

/// Key/value store holding `short code -> encoded URL` entries.
///
/// Keys are short codes, values are percent-encoded URLs. Entries are never
/// overwritten: the only write is [`UrlStore::set_if_absent`].
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis backend (`SETNX`)
/// - [`crate::infrastructure::store::InMemoryStore`] - Process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Returns the stored value for `code`, or `None` if absent.
    async fn get(&self, code: &str) -> StoreResult<Option<String>>;

    /// Returns true if `code` is occupied.
    async fn exists(&self, code: &str) -> StoreResult<bool>;

    /// Atomically stores `value` under `code` unless the key is occupied.
    async fn set_if_absent(&self, code: &str, value: &str) -> StoreResult<SetOutcome>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;
}
