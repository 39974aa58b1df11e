//! Service metadata and health endpoints.

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::config::database;
use axum::Json;
use axum::extract::State;
use serde::Serialize;

/// Routes advertised by `GET /`
pub const ENDPOINTS: &[&str] = &[
    "GET /health - Health check",
    "GET /api/config - Get countdown configuration",
    "PUT /api/config - Update configuration",
    "GET /api/news - Get all active news",
    "GET /api/news/:id - Get single news item",
    "POST /api/news - Create news item",
    "PUT /api/news/:id - Update news item",
    "DELETE /api/news/:id - Delete news item",
    "PATCH /api/news/:id/toggle - Toggle news active status",
    "POST /api/analytics/view - Track page view",
    "GET /api/analytics - Get analytics data",
];

/// Service metadata response
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    /// Service name
    pub message: &'static str,
    /// Always "running" when served
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Route listing
    pub endpoints: &'static [&'static str],
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" when the store answered
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
}

/// `GET /`
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Countdown Board API",
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS,
    })
}

/// `GET /health`
///
/// Returns 503 when the database does not answer a ping.
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    database::ping(&state.db).await.map_err(|e| {
        tracing::warn!(error = %e, "Health check failed");
        ApiError::Unavailable("Database unavailable".to_string())
    })?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
