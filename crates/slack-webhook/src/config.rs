//! Configuration types for slack-webhook.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::WebhookError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for posting to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Webhook URL. It embeds the credential, so it is kept secret.
    url: SecretString,
    /// Request timeout.
    pub timeout: Duration,
}

impl WebhookConfig {
    /// Create a new configuration with the given webhook URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: SecretString::from(url.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the webhook URL (exposes the secret).
    pub(crate) fn url(&self) -> &str {
        self.url.expose_secret()
    }

    /// Check that the URL is usable.
    pub fn validate(&self) -> Result<(), WebhookError> {
        let url = self.url();
        if url.trim().is_empty() {
            return Err(WebhookError::Config("webhook URL is empty".to_string()));
        }
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(WebhookError::Config(
                "webhook URL must start with http:// or https://".to_string(),
            ));
        }
        Ok(())
    }
}
