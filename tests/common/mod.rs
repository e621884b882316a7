#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use hash_shortener::application::services::RetryPolicy;
use hash_shortener::domain::repositories::{SetOutcome, StoreError, StoreResult, UrlStore};
use hash_shortener::infrastructure::store::InMemoryStore;
use hash_shortener::routes::app_router;
use hash_shortener::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const BASE_URL: &str = "http://localhost:3000";

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_salted_attempts: 3,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
    }
}

pub fn create_test_state(store: Arc<dyn UrlStore>) -> AppState {
    AppState::new(store, fast_retry(), BASE_URL)
}

pub fn create_test_server(store: Arc<dyn UrlStore>) -> TestServer {
    TestServer::new(app_router(create_test_state(store))).unwrap()
}

/// In-memory store that counts every call it receives.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryStore,
    pub gets: AtomicUsize,
    pub exists: AtomicUsize,
    pub sets: AtomicUsize,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: InMemoryStore::with_entries(entries),
            ..Self::default()
        }
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.gets() + self.exists.load(Ordering::SeqCst) + self.sets()
    }
}

#[async_trait]
impl UrlStore for RecordingStore {
    async fn get(&self, code: &str) -> StoreResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(code).await
    }

    async fn exists(&self, code: &str) -> StoreResult<bool> {
        self.exists.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(code).await
    }

    async fn set_if_absent(&self, code: &str, value: &str) -> StoreResult<SetOutcome> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set_if_absent(code, value).await
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Store in which every key is already taken by some other URL.
pub struct SaturatedStore;

#[async_trait]
impl UrlStore for SaturatedStore {
    async fn get(&self, _code: &str) -> StoreResult<Option<String>> {
        Ok(Some("https%3A%2F%2Felsewhere.example".to_string()))
    }

    async fn exists(&self, _code: &str) -> StoreResult<bool> {
        Ok(true)
    }

    async fn set_if_absent(&self, _code: &str, _value: &str) -> StoreResult<SetOutcome> {
        Ok(SetOutcome::AlreadyExists)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Store whose backend is unreachable.
pub struct UnavailableStore;

#[async_trait]
impl UrlStore for UnavailableStore {
    async fn get(&self, _code: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn exists(&self, _code: &str) -> StoreResult<bool> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn set_if_absent(&self, _code: &str, _value: &str) -> StoreResult<SetOutcome> {
        Err(StoreError::Timeout("SETNX exceeded 2000ms".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}
