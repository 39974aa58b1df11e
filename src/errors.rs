//! Unified error types and result handling for the countdown board.
//!
//! Service functions in [`crate::core`] return [`Result`]; the HTTP layer maps
//! these variants onto status codes in [`crate::api::error`].

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was missing or blank
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason, safe to return to callers
        message: String,
    },

    /// The addressed row does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up (e.g. "News")
        entity: &'static str,
        /// Identifier that matched nothing
        id: i64,
    },

    /// Connection or query failure in the persistence store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Invalid or unreadable settings
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading settings
        message: String,
    },

    /// I/O failure (binding the listener, reading files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote API request failed (client side)
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The host refused a clipboard write
    #[error("Clipboard error: {message}")]
    Clipboard {
        /// Reason reported by the host
        message: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
