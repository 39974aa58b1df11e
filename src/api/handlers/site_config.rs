//! `GET /api/config` and `PUT /api/config`.

use super::MessageResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::config::timezone::SiteTimezone;
use crate::core::site_config::{self, SiteConfig};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::Deserialize;

/// Body of `PUT /api/config`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigRequest {
    /// Headline text
    pub title: String,
    /// Subtitle text
    pub description: String,
    /// Countdown target
    pub target_date: TargetDate,
}

/// A target given either as a wall clock or as an RFC 3339 instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TargetDate {
    /// `2025-12-12T14:25:00`, read in the site timezone
    WallClock(NaiveDateTime),
    /// `2025-12-12T08:25:00Z` or `...+06:00`
    Instant(DateTime<FixedOffset>),
}

impl TargetDate {
    /// The wall-clock value to store.
    #[must_use]
    pub fn in_timezone(self, timezone: SiteTimezone) -> NaiveDateTime {
        match self {
            Self::WallClock(wall_clock) => wall_clock,
            Self::Instant(instant) => timezone.wall_clock(instant.with_timezone(&Utc)),
        }
    }
}

/// Returns the stored configuration or the defaults.
pub async fn get_config(State(state): State<AppState>) -> ApiResult<Json<SiteConfig>> {
    site_config::get_site_config(&state.db, &state.defaults)
        .await
        .map(Json)
        .map_err(ApiError::with_context("Failed to fetch configuration"))
}

/// Upserts the configuration.
pub async fn update_config(
    State(state): State<AppState>,
    payload: Result<Json<UpdateConfigRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(body) = payload?;

    let target_date = body.target_date.in_timezone(state.timezone);
    site_config::set_site_config(&state.db, body.title, body.description, target_date)
        .await
        .map_err(ApiError::with_context("Failed to update configuration"))?;

    Ok(Json(MessageResponse::new(
        "Configuration updated successfully",
    )))
}
