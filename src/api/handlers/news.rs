//! News feed endpoints.
//!
//! `:id` segments that are not integers are rejected with 400 before any
//! query runs.

use super::MessageResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::core::news::{self, NewNews, NewsUpdate};
use crate::entities::NewsModel;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/news`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    /// Required; checked by the service so a missing field reads the same as a blank one
    pub content: Option<String>,
    /// Defaults to true
    pub is_active: Option<bool>,
    /// Defaults to 0
    pub display_order: Option<i32>,
}

/// Body of `PUT /api/news/:id`
///
/// A full replace: omitted flags fall back to the creation defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    /// Required
    pub content: Option<String>,
    /// Defaults to true
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Defaults to 0
    #[serde(default)]
    pub display_order: i32,
}

const fn default_active() -> bool {
    true
}

/// Response of `POST /api/news`
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Human-readable outcome
    pub message: &'static str,
    /// Generated id of the new item
    pub id: i64,
}

/// Active items in feed order.
pub async fn list_news(State(state): State<AppState>) -> ApiResult<Json<Vec<NewsModel>>> {
    news::list_active_news(&state.db)
        .await
        .map(Json)
        .map_err(ApiError::with_context("Failed to fetch news"))
}

/// One item by id, active or not.
pub async fn get_news(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<NewsModel>> {
    let Path(id) = id?;
    news::get_news(&state.db, id)
        .await
        .map(Json)
        .map_err(ApiError::with_context("Failed to fetch news"))
}

/// Creates an item.
pub async fn create_news(
    State(state): State<AppState>,
    payload: Result<Json<CreateNewsRequest>, JsonRejection>,
) -> ApiResult<Json<CreatedResponse>> {
    let Json(body) = payload?;
    let defaults = NewNews::default();
    let item = NewNews {
        content: body.content.unwrap_or_default(),
        is_active: body.is_active.unwrap_or(defaults.is_active),
        display_order: body.display_order.unwrap_or(defaults.display_order),
    };

    let created = news::create_news(&state.db, item)
        .await
        .map_err(ApiError::with_context("Failed to create news"))?;

    Ok(Json(CreatedResponse {
        message: "News created successfully",
        id: created.id,
    }))
}

/// Replaces an item's mutable fields.
pub async fn update_news(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateNewsRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let Json(body) = payload?;
    let update = NewsUpdate {
        content: body.content.unwrap_or_default(),
        is_active: body.is_active,
        display_order: body.display_order,
    };

    news::update_news(&state.db, id, update)
        .await
        .map_err(ApiError::with_context("Failed to update news"))?;

    Ok(Json(MessageResponse::new("News updated successfully")))
}

/// Hard-deletes an item.
pub async fn delete_news(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    news::delete_news(&state.db, id)
        .await
        .map_err(ApiError::with_context("Failed to delete news"))?;

    Ok(Json(MessageResponse::new("News deleted successfully")))
}

/// Flips an item's visibility.
pub async fn toggle_news(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    news::toggle_news(&state.db, id)
        .await
        .map_err(ApiError::with_context("Failed to toggle news status"))?;

    Ok(Json(MessageResponse::new("News status toggled successfully")))
}
