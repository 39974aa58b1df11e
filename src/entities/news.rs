//! News entity - Announcements scrolled by the news ticker.
//!
//! Items are ordered by `display_order` ascending, newest first within the
//! same order. Inactive items stay in the table but are hidden from the feed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// News item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Server-generated identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Announcement text (never empty)
    pub content: String,
    /// Whether the item is shown in the public feed
    pub is_active: bool,
    /// Sort key, ascending
    pub display_order: i32,
    /// When the item was created (UTC)
    pub created_at: DateTime,
    /// When the item was last modified (UTC)
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
