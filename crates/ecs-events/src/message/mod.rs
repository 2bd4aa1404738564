//! Destination-specific notification payloads.

mod amazon_q;
mod slack;

use serde::Serialize;

pub use amazon_q::{AmazonQContent, AmazonQContext, AmazonQMessage, AmazonQMetadata};
pub use slack::{SlackBlock, SlackMessage, TextObject};

/// Where a notification is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Slack incoming webhook (Block Kit).
    Slack,
    /// Amazon Q Developer in chat applications, via a topic.
    AmazonQ,
}

impl Destination {
    /// Parse a destination name as used on the command line.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "slack" => Some(Self::Slack),
            "amazon-q" | "amazonq" | "q" => Some(Self::AmazonQ),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slack => "slack",
            Self::AmazonQ => "amazon-q",
        }
    }
}

/// An assembled notification, ready for a delivery target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NotificationPayload {
    Slack(SlackMessage),
    AmazonQ(AmazonQMessage),
}

impl NotificationPayload {
    pub fn destination(&self) -> Destination {
        match self {
            Self::Slack(_) => Destination::Slack,
            Self::AmazonQ(_) => Destination::AmazonQ,
        }
    }

    /// Serialize as the JSON message body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<SlackMessage> for NotificationPayload {
    fn from(message: SlackMessage) -> Self {
        Self::Slack(message)
    }
}

impl From<AmazonQMessage> for NotificationPayload {
    fn from(message: AmazonQMessage) -> Self {
        Self::AmazonQ(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_parse() {
        assert_eq!(Destination::parse("Slack"), Some(Destination::Slack));
        assert_eq!(Destination::parse("amazon-q"), Some(Destination::AmazonQ));
        assert_eq!(Destination::parse("sns"), None);
        assert_eq!(Destination::parse(Destination::AmazonQ.as_str()), Some(Destination::AmazonQ));
    }
}
