//! `POST /api/analytics/view` and `GET /api/analytics`.

use super::MessageResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::core::analytics::{self, Analytics};
use axum::Json;
use axum::extract::State;

/// Appends one page view.
pub async fn track_view(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    analytics::record_view(&state.db)
        .await
        .map_err(ApiError::with_context("Failed to track view"))?;

    Ok(Json(MessageResponse::new("View tracked")))
}

/// Total and today's view counts.
pub async fn get_analytics(State(state): State<AppState>) -> ApiResult<Json<Analytics>> {
    analytics::get_analytics(&state.db, state.timezone)
        .await
        .map(Json)
        .map_err(ApiError::with_context("Failed to fetch analytics"))
}
