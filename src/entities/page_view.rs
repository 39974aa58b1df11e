//! Page view entity - Append-only log of visits.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Page view database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "page_views")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Insertion order, carries no other meaning
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the view was recorded (UTC)
    pub viewed_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
