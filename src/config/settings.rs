//! Application settings loaded from `config.toml` and the environment.
//!
//! Every field has a serde default so a missing file, or a file containing
//! only one section, still yields a runnable configuration. Environment
//! variables are applied last and win over the file.

use super::timezone::SiteTimezone;
use crate::errors::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::Path;

/// Default location of the settings file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Headline shown until a configuration is stored
pub const DEFAULT_TITLE: &str = "হাদির হত্যার বিচারের দাবি";

/// Subtitle shown until a configuration is stored
pub const DEFAULT_DESCRIPTION: &str = "শহীদ ওসমান হাদি হত্যার বিচারহীনতার সময়কাল";

/// Top-level settings structure mirroring `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// HTTP listener settings
    pub server: ServerSettings,
    /// Persistence store settings
    pub database: DatabaseSettings,
    /// Site-wide presentation settings
    pub site: SiteSettings,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the API binds to, e.g. `0.0.0.0:5000`
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// `[database]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SeaORM connection URL
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://data/countdown.sqlite?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

/// `[site]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Timezone for the countdown target and the "today" analytics window
    pub timezone: SiteTimezone,
    /// Default headline
    pub title: String,
    /// Default subtitle
    pub description: String,
    /// Default countdown reference instant, wall clock in `timezone`
    pub target_date: NaiveDateTime,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            timezone: SiteTimezone::default(),
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            target_date: NaiveDate::from_ymd_opt(2024, 7, 18)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
        }
    }
}

impl SiteSettings {
    /// The configuration served while no row has been stored yet.
    #[must_use]
    pub fn defaults(&self) -> SiteDefaults {
        SiteDefaults {
            title: self.title.clone(),
            description: self.description.clone(),
            target_date: self.target_date,
        }
    }
}

/// Fallback site configuration returned before the first `PUT /api/config`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDefaults {
    /// Headline text
    pub title: String,
    /// Subtitle text
    pub description: String,
    /// Countdown reference instant
    pub target_date: NaiveDateTime,
}

impl Default for SiteDefaults {
    fn default() -> Self {
        SiteSettings::default().defaults()
    }
}

impl Settings {
    /// Applies environment variable overrides on top of the file values.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Recognised keys: `BIND_ADDRESS`, `DATABASE_URL`,
    /// `DATABASE_MAX_CONNECTIONS`, `SITE_TIMEZONE`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = lookup("BIND_ADDRESS") {
            self.server.bind_address = address;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(raw) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = raw.trim().parse().map_err(|e| Error::Config {
                message: format!("Invalid DATABASE_MAX_CONNECTIONS '{raw}': {e}"),
            })?;
        }
        if let Some(raw) = lookup("SITE_TIMEZONE") {
            self.site.timezone = raw.parse()?;
        }
        Ok(())
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value has the wrong type (e.g. an unparseable timezone)
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads `./config.toml` when present, then applies environment overrides.
///
/// A missing file is not an error; defaults are used instead.
pub fn load_settings() -> Result<Settings> {
    let mut settings = if Path::new(DEFAULT_CONFIG_PATH).exists() {
        load_config(DEFAULT_CONFIG_PATH)?
    } else {
        tracing::info!("No {DEFAULT_CONFIG_PATH} found, using default settings");
        Settings::default()
    };
    settings.apply_env()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.bind_address, "0.0.0.0:5000");
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.site.timezone, SiteTimezone::Local);
        assert_eq!(
            settings.site.target_date.to_string(),
            "2024-07-18 00:00:00"
        );
        assert_eq!(settings.site.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
            [database]
            url = "sqlite::memory:"

            [site]
            timezone = "+06:00"
            title = "Launch"
            target_date = "2025-12-12T14:25:00"
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.database.url, "sqlite::memory:");
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.server.bind_address, "0.0.0.0:5000");
        assert_eq!(settings.site.timezone.to_string(), "+06:00");
        assert_eq!(settings.site.title, "Launch");
        assert_eq!(
            settings.site.description,
            SiteDefaults::default().description
        );
        assert_eq!(
            settings.site.target_date.to_string(),
            "2025-12-12 14:25:00"
        );
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let result: std::result::Result<Settings, _> = toml::from_str(
            r#"
            [site]
            timezone = "somewhere"
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("SITE_TIMEZONE", "utc"),
        ]);

        let mut settings = Settings::default();
        settings
            .apply_overrides(|key| vars.get(key).map(ToString::to_string))
            .unwrap();

        assert_eq!(settings.server.bind_address, "127.0.0.1:8080");
        assert_eq!(settings.database.max_connections, 3);
        assert_eq!(settings.site.timezone.to_string(), "+00:00");
        assert_eq!(
            settings.database.url,
            DatabaseSettings::default().url,
            "unset keys keep their previous value"
        );
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let mut settings = Settings::default();
        let result = settings.apply_overrides(|key| {
            (key == "DATABASE_MAX_CONNECTIONS").then(|| "many".to_string())
        });
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
