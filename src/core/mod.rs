//! Core business logic - framework-agnostic services over the persistence store.
//!
//! Each function takes the database connection explicitly so the HTTP layer,
//! tests and any future caller share the same code path.

/// Page-view recording and counters
pub mod analytics;
/// News feed CRUD and status toggling
pub mod news;
/// Singleton site configuration
pub mod site_config;
