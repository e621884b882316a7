//! URL store backends.
//!
//! Provides two implementations of [`crate::domain::repositories::UrlStore`]:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`InMemoryStore`] - Process-local store for development and tests

mod memory_store;
mod redis_store;

pub use memory_store::InMemoryStore;
pub use redis_store::RedisStore;
