//! # Hash Shortener
//!
//! A URL shortening service built with Axum and Redis. Short codes are derived
//! from a SHA-256 hash of the URL (or of a custom alias); collisions are
//! detected through the store's atomic set-if-absent and resolved with salted
//! retries.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Short codes, URL mappings, store contract
//! - **Application Layer** ([`application`]) - Shorten/resolve orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"  # Optional, in-memory otherwise
//! export BASE_URL="http://localhost:3000"
//!
//! cargo run
//!
//! curl -X POST localhost:3000/api/shorten \
//!   -H 'content-type: application/json' \
//!   -d '{"originalUrl": "http://www.lighthouselabs.ca"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod routes;
pub mod server;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{RetryPolicy, ShortenerService};
    pub use crate::domain::entities::{ShortCode, UrlMapping};
    pub use crate::domain::repositories::{SetOutcome, StoreError, UrlStore};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{InMemoryStore, RedisStore};
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::deterministic_hash;
}
