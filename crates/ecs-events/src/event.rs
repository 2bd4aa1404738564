//! EventBridge envelope types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The `source` value carried by ECS events.
pub const ECS_EVENT_SOURCE: &str = "aws.ecs";

/// An EventBridge event as delivered to the notifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Event id assigned by EventBridge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Event type, e.g. "ECS Task State Change".
    #[serde(rename = "detail-type")]
    pub detail_type: String,

    /// Emitting service, "aws.ecs" for ECS events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// AWS account id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Event time as sent by EventBridge (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// AWS region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// ARNs of the resources the event refers to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: Vec<String>,

    /// Service-specific payload.
    #[serde(default, deserialize_with = "null_as_default")]
    pub detail: Map<String, Value>,
}

impl InboundEvent {
    /// Create an event with the given type and detail and no metadata.
    pub fn new(detail_type: impl Into<String>, detail: Map<String, Value>) -> Self {
        Self {
            id: None,
            detail_type: detail_type.into(),
            source: None,
            account: None,
            time: None,
            region: None,
            resources: Vec::new(),
            detail,
        }
    }

    /// Builder method to set the event id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder method to set the source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Builder method to add a resource ARN.
    pub fn with_resource(mut self, arn: impl Into<String>) -> Self {
        self.resources.push(arn.into());
        self
    }

    /// Whether the event was emitted by ECS.
    pub fn is_ecs(&self) -> bool {
        self.source.as_deref() == Some(ECS_EVENT_SOURCE)
    }

    /// Copy out the metadata used in message headers and footers.
    pub fn metadata(&self) -> EventMetadata {
        EventMetadata {
            id: self.id.clone(),
            detail_type: self.detail_type.clone(),
            account: self.account.clone(),
            time: self.time.clone(),
            region: self.region.clone(),
        }
    }
}

/// Read an explicit `null` as the empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Event fields rendered around the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMetadata {
    pub id: Option<String>,
    pub detail_type: String,
    pub account: Option<String>,
    pub time: Option<String>,
    pub region: Option<String>,
}
