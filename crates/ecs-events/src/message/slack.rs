//! Slack Block Kit message assembly.

use serde::{Deserialize, Serialize};

use crate::arn::ResourceRef;
use crate::event::EventMetadata;

/// A Slack `mrkdwn` text object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub text_type: String,
    pub text: String,
}

impl TextObject {
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            text_type: "mrkdwn".to_string(),
            text: text.into(),
        }
    }
}

/// The Block Kit blocks used by ECS notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlackBlock {
    Section { text: TextObject },
    Context { elements: Vec<TextObject> },
    Divider,
}

impl SlackBlock {
    pub fn section(text: impl Into<String>) -> Self {
        Self::Section {
            text: TextObject::mrkdwn(text),
        }
    }
}

/// Body of a Slack incoming-webhook request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub blocks: Vec<SlackBlock>,
}

impl SlackMessage {
    /// Assemble the block sequence for one event.
    ///
    /// `summary` is the rendered detail; `fallback` is the generic dump used
    /// when the summary is empty (`None` if the event had no detail).
    pub fn assemble(
        metadata: &EventMetadata,
        resources: &[ResourceRef],
        summary: &str,
        fallback: Option<&str>,
    ) -> Self {
        let mut blocks = vec![SlackBlock::section(format!("*{}*", metadata.detail_type))];

        if !resources.is_empty() {
            let lines: Vec<String> = resources.iter().map(ResourceRef::display_line).collect();
            blocks.push(SlackBlock::section(format!("*Resources*:\n{}", lines.join("\n"))));
        }

        if !summary.is_empty() {
            blocks.push(SlackBlock::section(summary));
        } else if let Some(dump) = fallback {
            blocks.push(SlackBlock::section(format!("*Event Detail:* {}", dump)));
        }

        blocks.push(SlackBlock::Context {
            elements: vec![
                TextObject::mrkdwn(format!(
                    "Account: {} Region: {}",
                    text_or_empty(&metadata.account),
                    text_or_empty(&metadata.region)
                )),
                TextObject::mrkdwn(format!(
                    "Time: {} UTC Id: {}",
                    text_or_empty(&metadata.time),
                    text_or_empty(&metadata.id)
                )),
            ],
        });
        blocks.push(SlackBlock::Divider);

        Self { blocks }
    }
}

fn text_or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
