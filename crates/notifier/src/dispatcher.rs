//! One-event dispatch: classify, assemble, deliver.

use std::sync::Arc;

use ecs_events::{Classified, InboundEvent, NotificationEngine};
use serde_json::json;
use tracing::{error, info};

use crate::delivery::Delivery;
use crate::error::DispatchError;

/// Result of dispatching a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The target accepted the payload.
    Delivered { status: u16 },
    /// The target answered with a non-success status. Not retried.
    Rejected { status: u16, body: String },
    /// The event was suppressed; nothing was sent.
    Skipped { reason: String },
}

impl DispatchOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Status document returned to the invoking runtime.
    pub fn to_status_json(&self) -> serde_json::Value {
        match self {
            Self::Delivered { status } | Self::Rejected { status, .. } => json!({ "code": status }),
            Self::Skipped { reason } => json!({ "skipped": reason }),
        }
    }
}

/// Runs the engine on inbound events and hands the result to a delivery target.
pub struct Dispatcher {
    engine: NotificationEngine,
    delivery: Arc<dyn Delivery>,
}

impl Dispatcher {
    pub fn new(engine: NotificationEngine, delivery: Arc<dyn Delivery>) -> Self {
        Self { engine, delivery }
    }

    pub fn engine(&self) -> &NotificationEngine {
        &self.engine
    }

    /// Dispatch one event.
    pub async fn dispatch(&self, event: &InboundEvent) -> Result<DispatchOutcome, DispatchError> {
        if self.engine.config().log_events {
            info!(event = %serde_json::to_string(event)?, "Event logging enabled");
        }

        if !event.is_ecs() {
            return Err(DispatchError::UnexpectedSource(event.source.clone()));
        }

        let notification = match self.engine.classify(event).await? {
            Classified::Notify(notification) => notification,
            Classified::Skipped { reason } => return Ok(DispatchOutcome::Skipped { reason }),
        };

        let payload = notification.payload(self.delivery.destination());
        let receipt = self.delivery.deliver(&payload).await?;

        if receipt.is_success() {
            info!(
                status = receipt.status,
                target = self.delivery.name(),
                event_id = event.id.as_deref().unwrap_or(""),
                "Notification delivered"
            );
            Ok(DispatchOutcome::Delivered {
                status: receipt.status,
            })
        } else {
            error!(
                status = receipt.status,
                body = %receipt.body,
                target = self.delivery.name(),
                event = %serde_json::to_string(event)?,
                "Error: received non-success status from delivery target"
            );
            Ok(DispatchOutcome::Rejected {
                status: receipt.status,
                body: receipt.body,
            })
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("engine", &self.engine)
            .field("delivery", &self.delivery.name())
            .finish()
    }
}
