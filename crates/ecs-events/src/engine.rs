//! The classification pipeline for a single event.

use tracing::{debug, error, info};

use crate::arn::ResourceRef;
use crate::config::EngineConfig;
use crate::detail::{generic_dump, DetailFormatter, FormattedDetail, Summary, TaskContext};
use crate::enrichment::LogEnricher;
use crate::error::EngineError;
use crate::event::{EventMetadata, InboundEvent};
use crate::message::{AmazonQMessage, Destination, NotificationPayload, SlackMessage};

/// Result of classifying one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// The event should be delivered.
    Notify(Notification),
    /// The event was suppressed; nothing should be delivered.
    Skipped { reason: String },
}

/// A classified event, ready to be assembled for a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    metadata: EventMetadata,
    resources: Vec<ResourceRef>,
    summary: String,
    dump: String,
    has_detail: bool,
}

impl Notification {
    pub fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    pub fn resources(&self) -> &[ResourceRef] {
        &self.resources
    }

    /// The rendered summary text.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Assemble the payload for a destination.
    pub fn payload(&self, destination: Destination) -> NotificationPayload {
        match destination {
            Destination::Slack => self.slack().into(),
            Destination::AmazonQ => self.amazon_q().into(),
        }
    }

    pub fn slack(&self) -> SlackMessage {
        let fallback = self.has_detail.then_some(self.dump.as_str());
        SlackMessage::assemble(&self.metadata, &self.resources, &self.summary, fallback)
    }

    pub fn amazon_q(&self) -> AmazonQMessage {
        AmazonQMessage::assemble(&self.metadata, &self.resources, &self.summary, &self.dump)
    }
}

/// Turns inbound events into notifications.
///
/// Holds no per-event state; one engine can classify any number of events.
#[derive(Debug, Clone)]
pub struct NotificationEngine {
    config: EngineConfig,
    formatter: DetailFormatter,
    enricher: Option<LogEnricher>,
}

impl NotificationEngine {
    /// Create an engine without log enrichment.
    pub fn new(config: EngineConfig) -> Self {
        if !config.suppression.is_empty() {
            debug!(
                stop_codes = ?config.suppression.stop_codes().collect::<Vec<_>>(),
                reason_fragments = ?config.suppression.reason_fragments().collect::<Vec<_>>(),
                "Stopped-task suppression configured"
            );
        }
        let formatter = DetailFormatter::new(config.suppression.clone());
        Self {
            config,
            formatter,
            enricher: None,
        }
    }

    /// Attach the collaborators used for log enrichment.
    ///
    /// Enrichment still only runs when `fetch_task_logs` is enabled.
    pub fn with_enricher(mut self, enricher: LogEnricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify an event: render its detail, apply suppression, and enrich.
    pub async fn classify(&self, event: &InboundEvent) -> Result<Classified, EngineError> {
        let resources = ResourceRef::parse_all(&event.resources);

        let (mut summary, task) = match self.formatter.format(&event.detail_type, &event.detail)? {
            FormattedDetail::Summary { summary, task } => (summary, task),
            FormattedDetail::Skip { reason } => {
                info!(
                    event_id = event.id.as_deref().unwrap_or(""),
                    detail_type = %event.detail_type,
                    "Skipping suppressed event: {}",
                    reason
                );
                return Ok(Classified::Skipped { reason });
            }
        };

        if let Some(task) = task {
            self.enrich(&mut summary, &task).await;
        }

        Ok(Classified::Notify(Notification {
            metadata: event.metadata(),
            resources,
            summary: summary.render(),
            dump: generic_dump(&event.detail),
            has_detail: !event.detail.is_empty(),
        }))
    }

    async fn enrich(&self, summary: &mut Summary, task: &TaskContext) {
        if !self.config.fetch_task_logs {
            return;
        }
        let Some(enricher) = &self.enricher else {
            debug!("Task log enrichment enabled but no log sources configured");
            return;
        };
        let Some(task_id) = task.task_id.as_deref() else {
            error!(
                task_definition = %task.task_definition_arn,
                "Task ID is not defined, skipping log enrichment"
            );
            return;
        };

        summary.extend(enricher.enrich(&task.task_definition_arn, task_id).await);
    }
}
