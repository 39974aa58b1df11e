//! HTTP data source for the client components.

use super::ticker::{NewsSource, TickerItem};
use crate::config::settings::{DEFAULT_DESCRIPTION, DEFAULT_TITLE};
use crate::config::timezone::SiteTimezone;
use crate::errors::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

/// API root used when none is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Site configuration as the countdown page consumes it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Headline text
    pub title: String,
    /// Subtitle text
    pub description: String,
    /// Countdown reference instant, wall clock
    pub target_date: NaiveDateTime,
}

impl ClientConfig {
    /// The target as an instant, reading the wall clock in `timezone`.
    ///
    /// Feed the result to [`super::countdown::CountdownTimer::start`].
    #[must_use]
    pub fn target_instant(&self, timezone: SiteTimezone) -> DateTime<Utc> {
        timezone.to_utc(self.target_date)
    }
}

impl Default for ClientConfig {
    /// Values rendered until the server answers.
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            target_date: chrono::NaiveDate::from_ymd_opt(2025, 12, 12)
                .and_then(|date| date.and_hms_opt(14, 25, 0))
                .unwrap_or_default(),
        }
    }
}

/// Thin `reqwest` wrapper over the public read endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Client rooted at `base_url`, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        debug!(%url, "GET");
        let value = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(value)
    }

    /// `GET {base}/config`.
    pub async fn fetch_site_config(&self) -> Result<ClientConfig> {
        self.get_json("config").await
    }

    /// The server's configuration, or [`ClientConfig::default`] on any failure.
    pub async fn load_site_config(&self) -> ClientConfig {
        self.fetch_site_config().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to fetch config, keeping defaults");
            ClientConfig::default()
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl NewsSource for ApiClient {
    async fn fetch_active(&self) -> Result<Vec<TickerItem>> {
        self.get_json("news").await
    }
}
