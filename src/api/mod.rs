//! HTTP API - axum router over the core services.
//!
//! Routes:
//! - `GET /` - service metadata and endpoint listing
//! - `GET /health` - store reachability probe
//! - `GET|PUT /api/config` - site configuration
//! - `POST /api/analytics/view`, `GET /api/analytics` - page views
//! - `GET|POST /api/news`, `GET|PUT|DELETE /api/news/{id}`,
//!   `PATCH /api/news/{id}/toggle` - news feed

/// HTTP error type and response mapping
pub mod error;
/// Request handlers
pub mod handlers;
/// Shared handler state
pub mod state;

use axum::Router;
use axum::routing::{get, patch, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use handlers::{analytics, general, news, site_config};
pub use state::AppState;

/// Builds the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(general::root))
        .route("/health", get(general::health))
        // Site configuration
        .route(
            "/api/config",
            get(site_config::get_config).put(site_config::update_config),
        )
        // Analytics
        .route("/api/analytics/view", post(analytics::track_view))
        .route("/api/analytics", get(analytics::get_analytics))
        // News
        .route("/api/news", get(news::list_news).post(news::create_news))
        .route(
            "/api/news/{id}",
            get(news::get_news)
                .put(news::update_news)
                .delete(news::delete_news),
        )
        .route("/api/news/{id}/toggle", patch(news::toggle_news))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
