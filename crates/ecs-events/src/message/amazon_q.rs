//! Amazon Q Developer custom notification assembly.

use serde::{Deserialize, Serialize};

use crate::arn::ResourceRef;
use crate::event::EventMetadata;

const SCHEMA_VERSION: &str = "1.0";
const SOURCE: &str = "custom";
const TEXT_TYPE: &str = "client-markdown";

/// A custom notification in the Amazon Q chat-applications schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmazonQMessage {
    pub version: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: AmazonQContent,
    pub metadata: AmazonQMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmazonQContent {
    pub text_type: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmazonQMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    pub summary: String,
    pub event_type: String,
    pub related_resources: Vec<String>,
    pub additional_context: AmazonQContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmazonQContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl AmazonQMessage {
    /// Assemble the notification for one event.
    ///
    /// `dump` is the fenced JSON of the detail, used as the description when
    /// the summary is empty.
    pub fn assemble(metadata: &EventMetadata, resources: &[ResourceRef], summary: &str, dump: &str) -> Self {
        let description = if summary.is_empty() {
            format!(
                "{}\r\n• account: {}\r\n• time: {}",
                dump,
                metadata.account.as_deref().unwrap_or(""),
                metadata.time.as_deref().unwrap_or("")
            )
        } else {
            summary.to_string()
        };

        Self {
            version: SCHEMA_VERSION.to_string(),
            source: SOURCE.to_string(),
            id: metadata.id.clone(),
            content: AmazonQContent {
                text_type: TEXT_TYPE.to_string(),
                title: metadata.detail_type.clone(),
                description,
                keywords: metadata.region.iter().cloned().collect(),
            },
            metadata: AmazonQMetadata {
                thread_id: metadata.id.clone(),
                summary: metadata.detail_type.clone(),
                event_type: metadata.detail_type.clone(),
                related_resources: resources.iter().map(ResourceRef::display_line).collect(),
                additional_context: AmazonQContext {
                    account: metadata.account.clone(),
                    time: metadata.time.clone(),
                },
            },
        }
    }
}
