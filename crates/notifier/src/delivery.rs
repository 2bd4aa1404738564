//! Delivery targets for assembled notifications.

use std::io::Write;

use async_trait::async_trait;
use ecs_events::{Destination, NotificationPayload};
use slack_webhook::WebhookClient;
use tracing::{debug, info};

use crate::error::DispatchError;

/// What a delivery target answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body, if any.
    pub body: String,
}

impl DeliveryReceipt {
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A target that takes notification payloads.
///
/// Implementations report the status they received rather than failing on
/// non-success answers; errors are for payloads that never reached the target.
#[async_trait]
pub trait Delivery: Send + Sync {
    /// The payload format this target expects.
    fn destination(&self) -> Destination;

    /// Deliver one payload.
    async fn deliver(&self, payload: &NotificationPayload) -> Result<DeliveryReceipt, DispatchError>;

    /// Get a human-readable name for this target.
    fn name(&self) -> &str;
}

/// Posts Slack payloads to an incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackWebhookDelivery {
    client: WebhookClient,
}

impl SlackWebhookDelivery {
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Delivery for SlackWebhookDelivery {
    fn destination(&self) -> Destination {
        Destination::Slack
    }

    async fn deliver(&self, payload: &NotificationPayload) -> Result<DeliveryReceipt, DispatchError> {
        let NotificationPayload::Slack(message) = payload else {
            return Err(DispatchError::Delivery(format!(
                "slack webhook cannot deliver {} payloads",
                payload.destination().as_str()
            )));
        };

        debug!(blocks = message.blocks.len(), "Sending slack message");
        let response = self.client.post(message).await?;
        Ok(DeliveryReceipt {
            status: response.status,
            body: response.body,
        })
    }

    fn name(&self) -> &str {
        "SlackWebhookDelivery"
    }
}

/// Writes the serialized message body to stdout, one JSON document per line.
///
/// Stands in for a topic publish, and doubles as the dry-run target.
#[derive(Debug, Clone, Copy)]
pub struct StdoutPublisher {
    destination: Destination,
}

impl StdoutPublisher {
    pub fn new(destination: Destination) -> Self {
        Self { destination }
    }
}

#[async_trait]
impl Delivery for StdoutPublisher {
    fn destination(&self) -> Destination {
        self.destination
    }

    async fn deliver(&self, payload: &NotificationPayload) -> Result<DeliveryReceipt, DispatchError> {
        let body = payload.to_json()?;
        {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", body)
                .and_then(|_| stdout.flush())
                .map_err(|e| DispatchError::Delivery(format!("failed to write to stdout: {}", e)))?;
        }

        info!(bytes = body.len(), destination = self.destination.as_str(), "Published message");
        Ok(DeliveryReceipt::ok())
    }

    fn name(&self) -> &str {
        "StdoutPublisher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecs_events::{AmazonQMessage, EventMetadata};
    use slack_webhook::WebhookConfig;

    #[tokio::test]
    async fn test_slack_delivery_rejects_amazon_q_payload() {
        let client = WebhookClient::new(WebhookConfig::new("http://127.0.0.1:9/hook")).unwrap();
        let delivery = SlackWebhookDelivery::new(client);
        let metadata = EventMetadata {
            detail_type: "Custom".to_string(),
            ..Default::default()
        };
        let payload = NotificationPayload::AmazonQ(AmazonQMessage::assemble(&metadata, &[], "x", ""));

        let err = delivery.deliver(&payload).await.unwrap_err();
        assert!(matches!(err, DispatchError::Delivery(_)));
    }

    #[test]
    fn test_receipt_success_range() {
        assert!(DeliveryReceipt::ok().is_success());
        assert!(!DeliveryReceipt {
            status: 404,
            body: "no_service".to_string()
        }
        .is_success());
    }

    #[test]
    fn test_stdout_publisher_destination() {
        assert_eq!(StdoutPublisher::new(Destination::AmazonQ).destination(), Destination::AmazonQ);
    }
}
