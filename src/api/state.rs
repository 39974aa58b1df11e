//! Shared handler state.

use crate::config::{settings::SiteDefaults, timezone::SiteTimezone};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    /// Pooled connection to the persistence store
    pub db: Arc<DatabaseConnection>,
    /// Timezone for the analytics "today" window
    pub timezone: SiteTimezone,
    /// Configuration served before one is stored
    pub defaults: Arc<SiteDefaults>,
}

impl AppState {
    /// Bundles the shared resources.
    pub fn new(db: DatabaseConnection, timezone: SiteTimezone, defaults: SiteDefaults) -> Self {
        Self {
            db: Arc::new(db),
            timezone,
            defaults: Arc::new(defaults),
        }
    }
}
