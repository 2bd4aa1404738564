//! ECS event dispatch for Slack and Amazon Q.
//!
//! Wires the `ecs-events` engine to a delivery target. One call to
//! [`Dispatcher::dispatch`] handles one inbound event:
//!
//! - Events from sources other than `aws.ecs` are rejected
//! - Suppressed events are reported as [`DispatchOutcome::Skipped`]
//! - Everything else is assembled for the target's destination and delivered
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ecs_events::{EngineConfig, InboundEvent, NotificationEngine};
//! use notifier::{Dispatcher, SlackWebhookDelivery};
//! use slack_webhook::{WebhookClient, WebhookConfig};
//!
//! # async fn example(event: InboundEvent) -> Result<(), notifier::DispatchError> {
//! let engine = NotificationEngine::new(EngineConfig::from_env()?);
//! let client = WebhookClient::new(WebhookConfig::new("https://hooks.slack.com/services/T/B/X"))?;
//! let dispatcher = Dispatcher::new(engine, Arc::new(SlackWebhookDelivery::new(client)));
//!
//! let outcome = dispatcher.dispatch(&event).await?;
//! println!("{}", outcome.to_status_json());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod delivery;
pub mod dispatcher;
pub mod error;

pub use config::{NotifierConfig, PlainTextResolver, SecretResolver, WebhookSource};
pub use delivery::{Delivery, DeliveryReceipt, SlackWebhookDelivery, StdoutPublisher};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::DispatchError;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
