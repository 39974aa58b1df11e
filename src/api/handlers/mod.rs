//! Request handlers, one module per resource.

/// Analytics endpoints
pub mod analytics;
/// Service metadata and health probe
pub mod general;
/// News feed endpoints
pub mod news;
/// Site configuration endpoints
pub mod site_config;

use serde::Serialize;

/// Acknowledgement body: `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: &'static str,
}

impl MessageResponse {
    /// Wraps a fixed message.
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}
