//! Classification and formatting engine for ECS EventBridge notifications.
//!
//! This crate turns a raw ECS lifecycle event into a notification payload:
//!
//! - Short names are pulled out of ARNs, falling back to the raw value
//! - The `detail` object is rendered per event type with status emoji
//! - Noisy stopped tasks can be suppressed by stop code or stop reason
//! - Recent container logs can be appended to task notifications
//! - The result is assembled as Slack blocks or an Amazon Q message
//!
//! # Example
//!
//! ```no_run
//! use ecs_events::{Classified, Destination, EngineConfig, InboundEvent, NotificationEngine};
//!
//! # async fn example(raw: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let engine = NotificationEngine::new(EngineConfig::default());
//! let event: InboundEvent = serde_json::from_str(raw)?;
//!
//! match engine.classify(&event).await? {
//!     Classified::Notify(notification) => {
//!         let payload = notification.payload(Destination::Slack);
//!         println!("{}", serde_json::to_string(&payload)?);
//!     }
//!     Classified::Skipped { reason } => println!("skipped: {}", reason),
//! }
//! # Ok(())
//! # }
//! ```

pub mod arn;
pub mod config;
pub mod detail;
pub mod emoji;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod event;
pub mod message;
pub mod suppression;

// Re-export async_trait so collaborator implementations don't need the dependency
pub use async_trait::async_trait;

pub use arn::ResourceRef;
pub use config::EngineConfig;
pub use detail::{DetailFormatter, DetailKind, FormattedDetail, Summary, TaskContext};
pub use engine::{Classified, Notification, NotificationEngine};
pub use enrichment::{
    ContainerDefinition, LogConfiguration, LogEnricher, LogEvent, LogQuery, LogStore,
    TaskDefinitionLookup,
};
pub use error::{EngineError, FormatError, SourceError};
pub use event::{EventMetadata, InboundEvent, ECS_EVENT_SOURCE};
pub use message::{AmazonQMessage, Destination, NotificationPayload, SlackBlock, SlackMessage};
pub use suppression::{SuppressionPolicy, SuppressionVerdict};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
