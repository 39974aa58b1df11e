//! Site configuration entity - The singleton row driving the countdown page.
//!
//! The table holds at most one record, always stored under id 1. When it is
//! empty the configured defaults are served instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed primary key of the singleton configuration row
pub const SINGLETON_ID: i32 = 1;

/// Site configuration database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "config")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Always [`SINGLETON_ID`]
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    /// Headline shown above the countdown
    pub title: String,
    /// Sub-heading shown under the title
    pub description: String,
    /// Wall-clock instant the countdown measures from, in the site timezone
    pub target_date: DateTime,
    /// When the row was last written (UTC)
    pub updated_at: DateTime,
}

/// The configuration row has no relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
