//! Error types for slack-webhook.

use thiserror::Error;

/// Errors that can occur when posting to a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
