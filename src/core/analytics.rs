//! Page-view analytics - an append-only log of visits and two counters over it.

use crate::{
    config::timezone::SiteTimezone,
    entities::{PageView, page_view},
    errors::Result,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use sea_orm::{PaginatorTrait, Set, prelude::*};
use serde::Serialize;
use tracing::instrument;

/// View counters returned by `GET /api/analytics`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Every view ever recorded
    pub total_views: u64,
    /// Views recorded since local midnight in the site timezone
    pub today_views: u64,
}

/// Records one page view at the current time.
pub async fn record_view(db: &DatabaseConnection) -> Result<()> {
    record_view_at(db, Utc::now().naive_utc()).await
}

/// Records one page view at a given UTC timestamp.
#[instrument(skip(db))]
pub async fn record_view_at(db: &DatabaseConnection, viewed_at: NaiveDateTime) -> Result<()> {
    page_view::ActiveModel {
        viewed_at: Set(viewed_at),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Counts total views and today's views.
pub async fn get_analytics(db: &DatabaseConnection, timezone: SiteTimezone) -> Result<Analytics> {
    get_analytics_at(db, timezone, Utc::now()).await
}

/// Counts views with "today" taken as the calendar day containing `now`.
#[instrument(skip(db))]
pub async fn get_analytics_at(
    db: &DatabaseConnection,
    timezone: SiteTimezone,
    now: DateTime<Utc>,
) -> Result<Analytics> {
    let today = timezone.day_bounds(now);

    let total_views = PageView::find().count(db).await?;
    let today_views = PageView::find()
        .filter(page_view::Column::ViewedAt.gte(today.start))
        .filter(page_view::Column::ViewedAt.lt(today.end))
        .count(db)
        .await?;

    Ok(Analytics {
        total_views,
        today_views,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::Duration;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[tokio::test]
    async fn test_empty_store() -> Result<()> {
        let db = setup_test_db().await?;
        let analytics = get_analytics(&db, SiteTimezone::Local).await?;
        assert_eq!(
            analytics,
            Analytics {
                total_views: 0,
                today_views: 0
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_record_view_counts_today() -> Result<()> {
        let db = setup_test_db().await?;

        for _ in 0..3 {
            record_view(&db).await?;
        }

        let analytics = get_analytics(&db, SiteTimezone::Local).await?;
        assert_eq!(analytics.total_views, 3);
        assert_eq!(analytics.today_views, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_today_window_uses_site_timezone() -> Result<()> {
        let db = setup_test_db().await?;
        let dhaka: SiteTimezone = "+06:00".parse()?;
        let now = at("2025-03-10 20:00:00").and_utc();

        // Dhaka day 2025-03-11 spans 2025-03-10 18:00 .. 2025-03-11 18:00 UTC
        record_view_at(&db, at("2025-03-10 17:59:59")).await?;
        record_view_at(&db, at("2025-03-10 18:00:00")).await?;
        record_view_at(&db, at("2025-03-10 19:30:00")).await?;
        record_view_at(&db, at("2025-03-11 18:00:00")).await?;

        let analytics = get_analytics_at(&db, dhaka, now).await?;
        assert_eq!(analytics.total_views, 4);
        assert_eq!(analytics.today_views, 2);

        // The same views seen from UTC: 2025-03-10 holds three of them
        let utc: SiteTimezone = "utc".parse()?;
        let analytics = get_analytics_at(&db, utc, now).await?;
        assert_eq!(analytics.today_views, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_old_views_only_count_in_total() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();

        record_view_at(&db, (now - Duration::days(3)).naive_utc()).await?;
        record_view_at(&db, now.naive_utc()).await?;

        let analytics = get_analytics_at(&db, SiteTimezone::Local, now).await?;
        assert_eq!(analytics.total_views, 2);
        assert_eq!(analytics.today_views, 1);
        Ok(())
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&Analytics {
            total_views: 7,
            today_views: 2,
        })
        .unwrap();
        assert_eq!(json, r#"{"totalViews":7,"todayViews":2}"#);
    }
}
