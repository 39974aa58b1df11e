/// Database configuration and connection management
pub mod database;

/// Application settings from config.toml and environment variables
pub mod settings;

/// Site timezone used for wall-clock values
pub mod timezone;
