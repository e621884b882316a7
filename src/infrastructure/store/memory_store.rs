//! Process-local URL store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::repositories::{SetOutcome, StoreResult, UrlStore};

/// A [`UrlStore`] backed by a `HashMap` behind an async lock.
///
/// Entries live as long as the process. Used when no Redis store is
/// configured and as the store in HTTP tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `(code, stored value)` pairs.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl UrlStore for InMemoryStore {
    async fn get(&self, code: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(code).cloned())
    }

    async fn exists(&self, code: &str) -> StoreResult<bool> {
        Ok(self.entries.read().await.contains_key(code))
    }

    async fn set_if_absent(&self, code: &str, value: &str) -> StoreResult<SetOutcome> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(code) {
            return Ok(SetOutcome::AlreadyExists);
        }

        entries.insert(code.to_string(), value.to_string());
        debug!(code, "In-memory store SET");
        Ok(SetOutcome::Created)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
