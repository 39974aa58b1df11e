//! Site configuration business logic - the singleton row behind the countdown.
//!
//! The `config` table holds at most one row, keyed by
//! [`site_config::SINGLETON_ID`]. Reads fall back to the configured defaults
//! when the row is absent; writes are a single `INSERT ... ON CONFLICT DO UPDATE`.

use crate::{
    config::settings::SiteDefaults,
    entities::{SiteConfig as SiteConfigEntity, site_config},
    errors::Result,
};
use chrono::{NaiveDateTime, Utc};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};
use serde::Serialize;
use tracing::{info, instrument};

/// Site configuration as served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Headline text
    pub title: String,
    /// Subtitle text
    pub description: String,
    /// Countdown reference instant, wall clock in the site timezone
    pub target_date: NaiveDateTime,
    /// Last write time (UTC); absent while the defaults are being served
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl From<site_config::Model> for SiteConfig {
    fn from(model: site_config::Model) -> Self {
        Self {
            title: model.title,
            description: model.description,
            target_date: model.target_date,
            updated_at: Some(model.updated_at),
        }
    }
}

impl From<&SiteDefaults> for SiteConfig {
    fn from(defaults: &SiteDefaults) -> Self {
        Self {
            title: defaults.title.clone(),
            description: defaults.description.clone(),
            target_date: defaults.target_date,
            updated_at: None,
        }
    }
}

/// Returns the stored configuration, or `defaults` when none has been saved.
///
/// A missing row is never an error.
#[instrument(skip(db, defaults))]
pub async fn get_site_config(
    db: &DatabaseConnection,
    defaults: &SiteDefaults,
) -> Result<SiteConfig> {
    let stored = SiteConfigEntity::find_by_id(site_config::SINGLETON_ID)
        .one(db)
        .await?;

    Ok(stored.map_or_else(|| SiteConfig::from(defaults), SiteConfig::from))
}

/// Stores the configuration, inserting the singleton row on first use.
#[instrument(skip(db, title, description))]
pub async fn set_site_config(
    db: &DatabaseConnection,
    title: String,
    description: String,
    target_date: NaiveDateTime,
) -> Result<()> {
    let row = site_config::ActiveModel {
        id: Set(site_config::SINGLETON_ID),
        title: Set(title),
        description: Set(description),
        target_date: Set(target_date),
        updated_at: Set(Utc::now().naive_utc()),
    };

    SiteConfigEntity::insert(row)
        .on_conflict(
            OnConflict::column(site_config::Column::Id)
                .update_columns([
                    site_config::Column::Title,
                    site_config::Column::Description,
                    site_config::Column::TargetDate,
                    site_config::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    info!("Site configuration updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_site_config_defaults_when_empty() -> Result<()> {
        let db = setup_test_db().await?;
        let defaults = SiteDefaults::default();

        let config = get_site_config(&db, &defaults).await?;
        assert_eq!(config.title, defaults.title);
        assert_eq!(config.description, defaults.description);
        assert_eq!(config.target_date, date(2024, 7, 18, 0, 0));
        assert!(config.updated_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let target = date(2025, 12, 12, 14, 25);

        set_site_config(&db, "Title".to_string(), "Desc".to_string(), target).await?;

        let config = get_site_config(&db, &SiteDefaults::default()).await?;
        assert_eq!(config.title, "Title");
        assert_eq!(config.description, "Desc");
        assert_eq!(config.target_date, target);
        assert!(config.updated_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_set_twice_keeps_single_row() -> Result<()> {
        let db = setup_test_db().await?;

        set_site_config(&db, "First".to_string(), "a".to_string(), date(2024, 1, 1, 0, 0)).await?;
        set_site_config(&db, "Second".to_string(), "b".to_string(), date(2025, 1, 1, 0, 0)).await?;

        let rows = SiteConfigEntity::find().all(&db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, site_config::SINGLETON_ID);

        let config = get_site_config(&db, &SiteDefaults::default()).await?;
        assert_eq!(config.title, "Second");
        assert_eq!(config.description, "b");
        assert_eq!(config.target_date, date(2025, 1, 1, 0, 0));

        Ok(())
    }

    #[test]
    fn test_serializes_camel_case() {
        let config = SiteConfig {
            title: "t".to_string(),
            description: "d".to_string(),
            target_date: date(2024, 7, 18, 0, 0),
            updated_at: None,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["targetDate"], "2024-07-18T00:00:00");
        assert!(json.get("updatedAt").is_none());
    }
}
