//! DTOs for health check endpoint.

use serde::Serialize;

/// Body of `GET /health`.
///
/// The only dependency checked is the URL store: `status` is `"healthy"` when
/// it answers a ping and `"degraded"` otherwise, with the HTTP status set to
/// 200 or 503 accordingly.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"healthy"` or `"degraded"`.
    pub status: String,
    /// Crate version serving the request.
    pub version: String,
    pub checks: HealthChecks,
}

/// Per-dependency results; a single entry for the URL store.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Redis or in-memory store reachability.
    pub store: CheckStatus,
}

/// Outcome of one dependency check.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    /// `"ok"` or `"error"`.
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
