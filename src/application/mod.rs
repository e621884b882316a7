//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::UrlStore`] trait and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Short code
//!   reservation with collision retry, and resolution

pub mod services;
