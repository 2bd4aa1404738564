//! Error types for notifier.

use ecs_events::EngineError;
use slack_webhook::WebhookError;
use thiserror::Error;

/// Errors that end a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The event did not come from ECS.
    #[error("the source of the incoming event is not \"aws.ecs\" (got {0:?})")]
    UnexpectedSource(Option<String>),

    /// The engine rejected the event.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Posting to the webhook failed.
    #[error("webhook error: {0}")]
    Webhook(#[from] WebhookError),

    /// The delivery target could not take the payload.
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing required environment variable.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
}
