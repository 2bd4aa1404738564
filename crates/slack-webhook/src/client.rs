//! Slack incoming-webhook HTTP client.

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config::WebhookConfig;
use crate::error::WebhookError;

/// Response to a webhook post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body; Slack answers `ok` or an error code such as `invalid_blocks`.
    pub body: String,
}

impl WebhookResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Client for posting messages to a Slack incoming webhook.
#[derive(Clone)]
pub struct WebhookClient {
    http: Client,
    config: WebhookConfig,
}

impl WebhookClient {
    /// Create a client for the configured webhook.
    pub fn new(config: WebhookConfig) -> Result<Self, WebhookError> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(WebhookError::Http)?;

        Ok(Self { http, config })
    }

    /// Post a JSON body to the webhook.
    ///
    /// Any HTTP status is returned as a response; only transport and
    /// serialization failures are errors.
    pub async fn post<T: Serialize + ?Sized>(&self, body: &T) -> Result<WebhookResponse, WebhookError> {
        let payload = serde_json::to_string(body)?;
        debug!(bytes = payload.len(), "Posting webhook message");

        let response = self
            .http
            .post(self.config.url())
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(WebhookError::Http)?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!(status, body = %body, "Webhook response");

        Ok(WebhookResponse { status, body })
    }

    /// Get the configuration.
    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }
}

impl std::fmt::Debug for WebhookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookClient")
            .field("timeout", &self.config.timeout)
            .finish()
    }
}
