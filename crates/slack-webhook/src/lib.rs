//! Slack incoming-webhook client library.
//!
//! Posts JSON message bodies (Block Kit `{"blocks": [...]}`) to a webhook
//! URL and reports the HTTP status. Non-success statuses are returned to the
//! caller rather than treated as errors, so the caller decides how to log them.
//!
//! # Example
//!
//! ```no_run
//! use slack_webhook::{WebhookClient, WebhookConfig};
//!
//! # async fn example() -> Result<(), slack_webhook::WebhookError> {
//! let config = WebhookConfig::new("https://hooks.slack.com/services/T000/B000/XXXX");
//! let client = WebhookClient::new(config)?;
//!
//! let body = serde_json::json!({"blocks": [{"type": "divider"}]});
//! let response = client.post(&body).await?;
//! println!("Slack answered {}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{WebhookClient, WebhookResponse};
pub use config::WebhookConfig;
pub use error::WebhookError;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
