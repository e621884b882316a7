//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RetryPolicy, ShortenerService};
use crate::domain::repositories::UrlStore;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService<dyn UrlStore>>,
    /// Prefix of every returned short URL, without a trailing slash.
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn UrlStore>, retry: RetryPolicy, base_url: &str) -> Self {
        Self {
            shortener: Arc::new(ShortenerService::new(store, retry)),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }
}
