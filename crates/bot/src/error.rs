//! Error types for the labelling bot.

use thiserror::Error;

/// Errors raised while talking to GitHub or loading configuration.
#[derive(Debug, Error)]
pub enum BotError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No API token in the environment
    #[error("GITHUB_TOKEN not set")]
    MissingToken,

    /// Repository argument not in `owner/name` form
    #[error("Invalid repository '{0}', expected owner/name")]
    InvalidRepository(String),

    /// Environment variable with an unusable value
    #[error("Invalid value for {name}: {value}")]
    InvalidConfig { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, BotError>;
