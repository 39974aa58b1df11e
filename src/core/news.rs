//! News business logic - Handles the announcement feed behind the ticker.
//!
//! Provides listing, lookup, creation, full update, hard delete and status
//! toggling. Every id-addressed operation reports [`Error::NotFound`] when no
//! row matched instead of succeeding silently.

use crate::{
    entities::{News, news},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

const ENTITY: &str = "News";

/// Fields accepted when creating a news item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNews {
    /// Announcement text, required
    pub content: String,
    /// Visible in the public feed (defaults to true)
    pub is_active: bool,
    /// Sort key (defaults to 0)
    pub display_order: i32,
}

impl NewNews {
    /// An active item at the default position.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

impl Default for NewNews {
    fn default() -> Self {
        Self {
            content: String::new(),
            is_active: true,
            display_order: 0,
        }
    }
}

/// Replacement values for every mutable field of a news item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsUpdate {
    /// New announcement text
    pub content: String,
    /// New visibility
    pub is_active: bool,
    /// New sort key
    pub display_order: i32,
}

fn require_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::validation("Content is required"));
    }
    Ok(())
}

/// Retrieves every active item in feed order.
///
/// Sorted by `display_order` ascending, then newest first. An empty feed is
/// an empty vector, not an error.
#[instrument(skip(db))]
pub async fn list_active_news(db: &DatabaseConnection) -> Result<Vec<news::Model>> {
    News::find()
        .filter(news::Column::IsActive.eq(true))
        .order_by_asc(news::Column::DisplayOrder)
        .order_by_desc(news::Column::CreatedAt)
        .order_by_desc(news::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a single item by id, active or not.
#[instrument(skip(db))]
pub async fn get_news(db: &DatabaseConnection, id: i64) -> Result<news::Model> {
    News::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::NotFound { entity: ENTITY, id })
}

/// Creates a news item and returns it with its generated id.
///
/// Blank content is rejected before anything touches the database.
#[instrument(skip(db, item), fields(display_order = item.display_order))]
pub async fn create_news(db: &DatabaseConnection, item: NewNews) -> Result<news::Model> {
    require_content(&item.content)?;

    let now = Utc::now().naive_utc();
    let created = news::ActiveModel {
        content: Set(item.content),
        is_active: Set(item.is_active),
        display_order: Set(item.display_order),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(id = created.id, "News item created");
    Ok(created)
}

/// Replaces content, visibility and order of an existing item.
#[instrument(skip(db, update))]
pub async fn update_news(db: &DatabaseConnection, id: i64, update: NewsUpdate) -> Result<()> {
    require_content(&update.content)?;

    let result = News::update_many()
        .col_expr(news::Column::Content, Expr::value(update.content))
        .col_expr(news::Column::IsActive, Expr::value(update.is_active))
        .col_expr(news::Column::DisplayOrder, Expr::value(update.display_order))
        .col_expr(news::Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
        .filter(news::Column::Id.eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound { entity: ENTITY, id });
    }
    Ok(())
}

/// Permanently removes an item.
#[instrument(skip(db))]
pub async fn delete_news(db: &DatabaseConnection, id: i64) -> Result<()> {
    let result = News::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound { entity: ENTITY, id });
    }
    info!(id, "News item deleted");
    Ok(())
}

/// Flips `is_active` in a single statement.
///
/// Applying it twice restores the original state.
#[instrument(skip(db))]
pub async fn toggle_news(db: &DatabaseConnection, id: i64) -> Result<()> {
    let result = News::update_many()
        .col_expr(
            news::Column::IsActive,
            Expr::col(news::Column::IsActive).not(),
        )
        .col_expr(news::Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
        .filter(news::Column::Id.eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound { entity: ENTITY, id });
    }
    Ok(())
}
