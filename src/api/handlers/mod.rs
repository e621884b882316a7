//! HTTP request handlers for API endpoints.

pub mod fallback;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use fallback::unknown_endpoint_handler;
pub use health::health_handler;
pub use redirect::{redirect_handler, shorten_path_redirect_handler};
pub use shorten::shorten_handler;
