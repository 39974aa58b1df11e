//! Database configuration module for the countdown board.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! models without hand-written SQL. Creation is idempotent and safe to run on
//! every startup.

use super::settings::DatabaseSettings;
use crate::entities::{News, PageView, SiteConfig};
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::info;

/// Establishes a pooled connection using the configured URL.
///
/// In-memory `SQLite` gives every pooled connection its own private database,
/// so the pool is pinned to a single connection for `:memory:` URLs.
pub async fn create_connection(settings: &DatabaseSettings) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(settings.url.clone());
    let max_connections = if is_in_memory(&settings.url) {
        1
    } else {
        settings.max_connections.max(1)
    };
    options
        .max_connections(max_connections)
        .sqlx_logging(false);

    info!(url = %settings.url, max_connections, "Connecting to database");
    Database::connect(options).await.map_err(Into::into)
}

/// Creates the directory holding a file-backed `SQLite` database.
///
/// `sqlx` creates the file itself (`mode=rwc`) but not missing parent directories.
pub fn ensure_parent_dir(url: &str) -> Result<()> {
    if is_in_memory(url) {
        return Ok(());
    }
    let Some(path) = url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or_default();
    match std::path::Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
        _ => {}
    }
    Ok(())
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Creates all tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table_for(db, SiteConfig).await?;
    create_table_for(db, News).await?;
    create_table_for(db, PageView).await?;
    Ok(())
}

async fn create_table_for<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Runs a trivial query to confirm the store is reachable.
pub async fn ping(db: &DatabaseConnection) -> Result<()> {
    db.ping().await.map_err(Into::into)
}
