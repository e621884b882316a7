//! Redis-backed URL store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::repositories::{SetOutcome, StoreError, StoreResult, UrlStore};

/// Redis implementation of [`UrlStore`].
///
/// Uses `ConnectionManager` for automatic reconnection. Writes go through
/// `SETNX`, so reservation of a short code is atomic across processes. Every
/// command is bounded by the configured timeout.
pub struct RedisStore {
    client: ConnectionManager,
    key_prefix: String,
    timeout: Duration,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - Namespace prepended to every short code key
    /// - `timeout` - Upper bound for each command, including the initial PING
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid or the
    /// connection cannot be established, [`StoreError::Timeout`] if the PING
    /// does not answer in time.
    pub async fn connect(
        redis_url: &str,
        key_prefix: impl Into<String>,
        timeout: Duration,
    ) -> StoreResult<Self> {
        info!("Connecting to Redis store");

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout("connect".to_string()))?
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self {
            client: manager,
            key_prefix: key_prefix.into(),
            timeout,
        };

        let mut conn = store.client.clone();
        store.bounded("PING", conn.ping::<()>()).await?;

        info!("✓ Connected to Redis store");

        Ok(store)
    }

    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }

    /// Awaits a Redis command under the store timeout.
    async fn bounded<T>(
        &self,
        operation: &'static str,
        command: impl Future<Output = Result<T, RedisError>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.timeout, command).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(map_redis_error(operation, e)),
            Err(_) => Err(StoreError::Timeout(format!(
                "{operation} exceeded {}ms",
                self.timeout.as_millis()
            ))),
        }
    }
}

fn map_redis_error(operation: &str, err: RedisError) -> StoreError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        StoreError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_dropped() {
        StoreError::Connection(message)
    } else {
        StoreError::Operation(message)
    }
}

#[async_trait]
impl UrlStore for RedisStore {
    async fn get(&self, code: &str) -> StoreResult<Option<String>> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        let value = self
            .bounded("GET", conn.get::<_, Option<String>>(&key))
            .await
            .inspect_err(|e| warn!(code, error = %e, "Redis GET failed"))?;

        debug!(code, hit = value.is_some(), "Store GET");
        Ok(value)
    }

    async fn exists(&self, code: &str) -> StoreResult<bool> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        self.bounded("EXISTS", conn.exists::<_, bool>(&key))
            .await
            .inspect_err(|e| warn!(code, error = %e, "Redis EXISTS failed"))
    }

    async fn set_if_absent(&self, code: &str, value: &str) -> StoreResult<SetOutcome> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        let created = self
            .bounded("SETNX", conn.set_nx::<_, _, bool>(&key, value))
            .await
            .inspect_err(|e| warn!(code, error = %e, "Redis SETNX failed"))?;

        debug!(code, created, "Store SETNX");
        Ok(if created {
            SetOutcome::Created
        } else {
            SetOutcome::AlreadyExists
        })
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        self.bounded("PING", conn.ping::<()>()).await.is_ok()
    }
}
