//! Shared test utilities for the countdown board.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::settings::DatabaseSettings,
    core::news::{self, NewNews},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let db = crate::config::database::create_connection(&settings).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an active news item at display order 0.
pub async fn create_test_news(
    db: &DatabaseConnection,
    content: &str,
) -> Result<entities::NewsModel> {
    news::create_news(db, NewNews::new(content)).await
}

/// Creates a news item with custom visibility and order.
pub async fn create_custom_news(
    db: &DatabaseConnection,
    content: &str,
    is_active: bool,
    display_order: i32,
) -> Result<entities::NewsModel> {
    news::create_news(
        db,
        NewNews {
            content: content.to_string(),
            is_active,
            display_order,
        },
    )
    .await
}

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
