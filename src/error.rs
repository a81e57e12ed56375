// src/error.rs

//! Unified error handling for the crawl engine.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawl operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The remote API throttled the request
    #[error("Rate limited by remote API (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    /// The requested object does not exist or is not shared with the integration
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success answer from the remote API
    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// A record from the remote API could not be interpreted
    #[error("Malformed record in {context}: {message}")]
    MalformedRecord { context: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a malformed-record error with context.
    pub fn malformed(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::MalformedRecord {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Whether the error came from talking to the remote content source.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::RateLimited { .. }
                | Self::NotFound(_)
                | Self::Api { .. }
                | Self::MalformedRecord { .. }
        )
    }
}
