//! Short link creation and resolution.

use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::entities::{ShortCode, UrlMapping, decode_stored_url};
use crate::domain::repositories::{SetOutcome, StoreError, UrlStore};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, deterministic_hash};
use crate::utils::url_validator::validate_url;

/// Bounds for the salted retry loop that follows a primary collision.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Number of salted candidates tried after the primary one collides.
    pub max_salted_attempts: u32,
    /// Base of the exponential backoff between salted attempts.
    pub base_delay: Duration,
    /// Upper bound for a single backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_salted_attempts: 3,
            base_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Delays between salted attempts; the first attempt runs immediately.
    fn backoff(&self) -> impl Iterator<Item = Duration> + use<> {
        self.delays().map(jitter)
    }

    /// Un-jittered delays: `base * 2`, `base * 4`, ... capped at `max_delay`.
    fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let retries = self.max_salted_attempts.saturating_sub(1) as usize;

        // `from_millis(b)` yields b^n; a fixed base of 2 scaled by `factor` doubles.
        ExponentialBackoff::from_millis(2)
            .factor(base_ms.max(1))
            .max_delay(self.max_delay)
            .take(retries)
    }
}

/// Result of trying to claim a short code in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// The code was free and now maps to the URL.
    Created,
    /// The code already maps to the same URL.
    Existing,
    /// The code maps to a different URL.
    Collision,
}

/// Failure of a single salted attempt.
#[derive(Debug)]
enum AttemptError {
    Collision(ShortCode),
    Store(StoreError),
}

/// Service for creating and resolving hash-derived short links.
///
/// The store is injected; all coordination between concurrent requests is
/// delegated to its atomic set-if-absent.
pub struct ShortenerService<S: UrlStore + ?Sized> {
    store: Arc<S>,
    generator: CodeGenerator,
    retry: RetryPolicy,
}

impl<S: UrlStore + ?Sized> ShortenerService<S> {
    /// Creates a new shortener service.
    pub fn new(store: Arc<S>, retry: RetryPolicy) -> Self {
        Self::with_generator(store, CodeGenerator::new(), retry)
    }

    /// Creates a service with an explicit salt generator.
    pub fn with_generator(store: Arc<S>, generator: CodeGenerator, retry: RetryPolicy) -> Self {
        Self {
            store,
            generator,
            retry,
        }
    }

    /// Creates a short code for `original_url`.
    ///
    /// # Code Selection
    ///
    /// - With a non-empty `custom_code`, the code is the hash of the alias. It
    ///   is never retried: an occupied alias fails with [`AppError::AliasTaken`].
    /// - Otherwise the code is the hash of the URL. On collision, salted
    ///   candidates are tried up to [`RetryPolicy::max_salted_attempts`] times
    ///   with exponential backoff.
    ///
    /// Shortening a URL that is already stored under its primary code returns
    /// that code.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] before any store call if the URL is malformed
    /// - [`AppError::AliasTaken`] if the alias hash is occupied
    /// - [`AppError::CollisionExhausted`] if every candidate collided
    /// - [`AppError::StoreUnavailable`] on store failures (never retried)
    pub async fn shorten_url(
        &self,
        original_url: &str,
        custom_code: Option<&str>,
    ) -> Result<ShortCode, AppError> {
        validate_url(original_url).map_err(|e| AppError::InvalidUrl {
            reason: e.to_string(),
        })?;

        match custom_code.filter(|alias| !alias.is_empty()) {
            Some(alias) => self.shorten_with_alias(original_url, alias).await,
            None => self.shorten_generated(original_url).await,
        }
    }

    /// Claims `mapping.code` for `mapping.original_url`.
    ///
    /// A key that already holds the same encoded URL counts as
    /// [`Reservation::Existing`] rather than a collision.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn reserve_short_code(&self, mapping: &UrlMapping) -> Result<Reservation, StoreError> {
        let value = mapping.stored_value();
        let code = mapping.code.as_str();

        match self.store.set_if_absent(code, &value).await? {
            SetOutcome::Created => Ok(Reservation::Created),
            SetOutcome::AlreadyExists => {
                let existing = self.store.get(code).await?;
                if existing.as_deref() == Some(value.as_str()) {
                    Ok(Reservation::Existing)
                } else {
                    Ok(Reservation::Collision)
                }
            }
        }
    }

    /// Looks up the original URL for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping exists.
    /// Returns [`AppError::StoreUnavailable`] on store failures or if the
    /// stored value cannot be decoded.
    pub async fn resolve_short_code(&self, code: &str) -> Result<String, AppError> {
        let stored = self
            .store
            .get(code)
            .await?
            .ok_or_else(|| AppError::NotFound {
                code: code.to_string(),
            })?;

        decode_stored_url(&stored).map_err(|e| {
            AppError::from(StoreError::InvalidData(format!(
                "value for '{code}' is not valid UTF-8 after decoding: {e}"
            )))
        })
    }

    /// Constructs the full short URL from a base URL and code.
    pub fn short_url(&self, base_url: &str, code: &ShortCode) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    /// Checks if the underlying store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await
    }

    async fn shorten_with_alias(&self, original_url: &str, alias: &str) -> Result<ShortCode, AppError> {
        let candidate = deterministic_hash(alias.as_bytes());

        if self.store.exists(candidate.as_str()).await? {
            return Err(AppError::AliasTaken { code: candidate });
        }

        let mapping = UrlMapping::new(candidate.clone(), original_url);
        match self.reserve_short_code(&mapping).await? {
            Reservation::Created | Reservation::Existing => {
                info!(code = %candidate, "Created short link from custom alias");
                Ok(candidate)
            }
            // Another request claimed the alias between the check and the write.
            Reservation::Collision => Err(AppError::AliasTaken { code: candidate }),
        }
    }

    async fn shorten_generated(&self, original_url: &str) -> Result<ShortCode, AppError> {
        let candidate = deterministic_hash(original_url.as_bytes());

        let mapping = UrlMapping::new(candidate.clone(), original_url);
        match self.reserve_short_code(&mapping).await? {
            Reservation::Created => {
                info!(code = %candidate, "Created short link");
                return Ok(candidate);
            }
            Reservation::Existing => {
                debug!(code = %candidate, "URL already shortened under primary code");
                return Ok(candidate);
            }
            Reservation::Collision => {
                counter!("shortener_collisions_total", "stage" => "primary").increment(1);
                warn!(code = %candidate, "Primary short code collided, retrying with salt");
            }
        }

        let mut attempt = 0u32;
        let outcome = RetryIf::spawn(
            self.retry.backoff(),
            || {
                let current = attempt;
                attempt += 1;
                self.try_salted(original_url, current)
            },
            |err: &AttemptError| matches!(err, AttemptError::Collision(_)),
        )
        .await;

        match outcome {
            Ok(code) => Ok(code),
            Err(AttemptError::Store(e)) => Err(e.into()),
            Err(AttemptError::Collision(last)) => {
                counter!("shortener_collisions_exhausted_total").increment(1);
                error!(
                    primary = %candidate,
                    last = %last,
                    attempts = self.retry.max_salted_attempts,
                    "Every salted short code collided"
                );
                Err(AppError::CollisionExhausted {
                    attempts: self.retry.max_salted_attempts,
                })
            }
        }
    }

    async fn try_salted(&self, original_url: &str, attempt: u32) -> Result<ShortCode, AttemptError> {
        let candidate = self.generator.salted_hash(original_url, attempt);

        let mapping = UrlMapping::new(candidate.clone(), original_url);
        match self
            .reserve_short_code(&mapping)
            .await
            .map_err(AttemptError::Store)?
        {
            Reservation::Created | Reservation::Existing => {
                info!(code = %candidate, attempt, "Created short link with salted code");
                Ok(candidate)
            }
            Reservation::Collision => {
                counter!("shortener_collisions_total", "stage" => "salted").increment(1);
                debug!(code = %candidate, attempt, "Salted short code collided");
                Err(AttemptError::Collision(candidate))
            }
        }
    }
}
