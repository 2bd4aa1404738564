//! Dispatcher configuration.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use ecs_events::EngineConfig;
use slack_webhook::config::DEFAULT_TIMEOUT;
use tracing::info;

use crate::error::DispatchError;

/// Where the Slack webhook URL comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WebhookSource {
    /// The variable holds the URL itself.
    #[default]
    Text,
    /// The variable holds a Secrets Manager secret id.
    SecretsManager,
    /// The variable holds an SSM parameter name.
    Ssm,
}

impl WebhookSource {
    /// Parse `SLACK_WEBHOOK_URL_SOURCE_TYPE`.
    pub fn parse(value: &str) -> Result<Self, DispatchError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "secretsmanager" => Ok(Self::SecretsManager),
            "ssm" => Ok(Self::Ssm),
            _ => Err(DispatchError::Config(
                "SLACK_WEBHOOK_URL_SOURCE_TYPE is not valid, it should be one of: text, secretsmanager, ssm"
                    .to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::SecretsManager => "secretsmanager",
            Self::Ssm => "ssm",
        }
    }
}

/// Turns a configured webhook value into the webhook URL.
#[async_trait]
pub trait SecretResolver: Send + Sync {
    async fn resolve(&self, source: WebhookSource, value: &str) -> Result<String, DispatchError>;
}

/// Resolves plain-text values only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextResolver;

#[async_trait]
impl SecretResolver for PlainTextResolver {
    async fn resolve(&self, source: WebhookSource, value: &str) -> Result<String, DispatchError> {
        match source {
            WebhookSource::Text => {
                info!("Getting slack credentials as plain text");
                Ok(value.to_string())
            }
            other => Err(DispatchError::Config(format!(
                "no resolver available for webhook source `{}`",
                other.as_str()
            ))),
        }
    }
}

/// Configuration for the `ecs-notify` dispatcher.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Engine settings.
    pub engine: EngineConfig,
    /// `SLACK_WEBHOOK_URL`: the URL or the name of the secret holding it.
    pub webhook_value: Option<String>,
    /// How to interpret `webhook_value`.
    pub webhook_source: WebhookSource,
    /// Webhook request timeout.
    pub webhook_timeout: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            webhook_value: None,
            webhook_source: WebhookSource::default(),
            webhook_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl NotifierConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the engine settings (see [`EngineConfig::from_env`]) plus:
    /// - `SLACK_WEBHOOK_URL` - webhook URL or secret name (required for Slack)
    /// - `SLACK_WEBHOOK_URL_SOURCE_TYPE` - text, secretsmanager or ssm (default: text)
    /// - `SLACK_WEBHOOK_TIMEOUT_SECS` - request timeout (default: 10)
    pub fn from_env() -> Result<Self, DispatchError> {
        let engine = EngineConfig::from_env()?;

        let webhook_value = env::var("SLACK_WEBHOOK_URL").ok().filter(|v| !v.trim().is_empty());

        let webhook_source = match env::var("SLACK_WEBHOOK_URL_SOURCE_TYPE") {
            Ok(value) => WebhookSource::parse(&value)?,
            Err(_) => WebhookSource::default(),
        };

        let webhook_timeout = match env::var("SLACK_WEBHOOK_TIMEOUT_SECS") {
            Ok(value) => Duration::from_secs(value.trim().parse::<u64>().map_err(|e| {
                DispatchError::Config(format!("Invalid SLACK_WEBHOOK_TIMEOUT_SECS: {}", e))
            })?),
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            engine,
            webhook_value,
            webhook_source,
            webhook_timeout,
        })
    }

    /// Resolve the webhook URL through `resolver`.
    pub async fn webhook_url(&self, resolver: &dyn SecretResolver) -> Result<String, DispatchError> {
        let value = self.webhook_value.as_deref().ok_or_else(|| {
            DispatchError::MissingEnvVar("SLACK_WEBHOOK_URL".to_string())
        })?;
        resolver.resolve(self.webhook_source, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_source_parse() {
        assert_eq!(WebhookSource::parse("text").unwrap(), WebhookSource::Text);
        assert_eq!(WebhookSource::parse("SecretsManager").unwrap(), WebhookSource::SecretsManager);
        assert_eq!(WebhookSource::parse("ssm").unwrap(), WebhookSource::Ssm);
        assert!(matches!(WebhookSource::parse("vault"), Err(DispatchError::Config(_))));
    }

    #[tokio::test]
    async fn test_plain_text_resolution() {
        let config = NotifierConfig {
            webhook_value: Some("https://hooks.slack.com/services/T/B/X".to_string()),
            ..Default::default()
        };
        let url = config.webhook_url(&PlainTextResolver).await.unwrap();
        assert_eq!(url, "https://hooks.slack.com/services/T/B/X");
    }

    #[tokio::test]
    async fn test_secret_sources_need_a_resolver() {
        let config = NotifierConfig {
            webhook_value: Some("slack/webhook".to_string()),
            webhook_source: WebhookSource::Ssm,
            ..Default::default()
        };
        let err = config.webhook_url(&PlainTextResolver).await.unwrap_err();
        assert!(matches!(err, DispatchError::Config(_)));
    }

    #[tokio::test]
    async fn test_missing_webhook_value() {
        let err = NotifierConfig::default()
            .webhook_url(&PlainTextResolver)
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::MissingEnvVar(_)));
    }
}
