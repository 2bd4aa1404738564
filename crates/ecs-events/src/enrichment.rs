//! Recent container logs for task notifications.
//!
//! The [`LogEnricher`] looks up a task definition, picks the essential
//! containers that log through the `awslogs` driver, and renders a console
//! link plus the last few log lines for each of them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::SourceError;

/// Maximum number of log lines fetched per container.
pub const LOG_LINES_PER_CONTAINER: usize = 10;

/// The only log driver whose logs can be fetched.
pub const AWSLOGS_DRIVER: &str = "awslogs";

const OPTION_GROUP: &str = "awslogs-group";
const OPTION_STREAM_PREFIX: &str = "awslogs-stream-prefix";
const OPTION_REGION: &str = "awslogs-region";

/// A container definition as returned by `DescribeTaskDefinition`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub essential: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_configuration: Option<LogConfiguration>,
}

impl ContainerDefinition {
    /// An essential container logging through `awslogs`.
    pub fn awslogs(name: impl Into<String>, group: &str, stream_prefix: &str, region: &str) -> Self {
        let options = [
            (OPTION_GROUP, group),
            (OPTION_STREAM_PREFIX, stream_prefix),
            (OPTION_REGION, region),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            name: name.into(),
            essential: true,
            log_configuration: Some(LogConfiguration {
                log_driver: AWSLOGS_DRIVER.to_string(),
                options,
            }),
        }
    }

    /// Builder method to set the essential flag.
    pub fn with_essential(mut self, essential: bool) -> Self {
        self.essential = essential;
        self
    }
}

/// Log driver settings of a container definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfiguration {
    #[serde(default)]
    pub log_driver: String,

    #[serde(default)]
    pub options: HashMap<String, String>,
}

/// A single CloudWatch log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    /// Milliseconds since the epoch.
    pub timestamp: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingestion_time: Option<i64>,
}

impl LogEvent {
    pub fn new(timestamp: i64, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
            ingestion_time: None,
        }
    }
}

/// Parameters for a `GetLogEvents` call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogQuery {
    pub log_group: String,
    pub log_stream: String,
    pub limit: usize,
    /// `false` reads from the tail of the stream.
    pub start_from_head: bool,
}

impl LogQuery {
    /// The last [`LOG_LINES_PER_CONTAINER`] events of a stream.
    pub fn tail(log_group: impl Into<String>, log_stream: impl Into<String>) -> Self {
        Self {
            log_group: log_group.into(),
            log_stream: log_stream.into(),
            limit: LOG_LINES_PER_CONTAINER,
            start_from_head: false,
        }
    }
}

/// Resolves the container definitions of a task definition.
#[async_trait]
pub trait TaskDefinitionLookup: Send + Sync {
    /// Get the container definitions of a task definition ARN.
    async fn container_definitions(
        &self,
        task_definition_arn: &str,
    ) -> Result<Vec<ContainerDefinition>, SourceError>;
}

/// Reads log events from a log store.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Get log events in chronological order, at most `query.limit` of them.
    async fn recent_events(&self, query: &LogQuery) -> Result<Vec<LogEvent>, SourceError>;
}

/// Appends container log links and recent log lines to task summaries.
#[derive(Clone)]
pub struct LogEnricher {
    task_definitions: Arc<dyn TaskDefinitionLookup>,
    logs: Arc<dyn LogStore>,
}

impl LogEnricher {
    pub fn new(task_definitions: Arc<dyn TaskDefinitionLookup>, logs: Arc<dyn LogStore>) -> Self {
        Self { task_definitions, logs }
    }

    /// Render the log lines for a task.
    ///
    /// Lookup and fetch failures are logged and leave out the affected part;
    /// they never fail the notification.
    pub async fn enrich(&self, task_definition_arn: &str, task_id: &str) -> Vec<String> {
        let containers = match self.task_definitions.container_definitions(task_definition_arn).await {
            Ok(containers) => containers,
            Err(e) => {
                error!(task_definition = %task_definition_arn, "Failed to describe task definition: {}", e);
                return Vec::new();
            }
        };

        let mut lines = Vec::new();
        for container in containers.iter().filter(|c| c.essential) {
            let Some(target) = LogTarget::from_container(container) else {
                continue;
            };

            lines.push(format!(" [Logs {}]({})", container.name, target.console_url(task_id)));

            let query = LogQuery::tail(target.group, target.stream(task_id));
            match self.logs.recent_events(&query).await {
                Ok(events) if !events.is_empty() => lines.push(code_block(&events)),
                Ok(_) => debug!(stream = %query.log_stream, "No log events"),
                Err(e) => {
                    warn!(group = %query.log_group, stream = %query.log_stream, "Failed to fetch log events: {}", e)
                }
            }
        }

        lines
    }
}

impl std::fmt::Debug for LogEnricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogEnricher").finish_non_exhaustive()
    }
}

/// Where a container's `awslogs` output lives.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogTarget<'a> {
    container: &'a str,
    group: &'a str,
    stream_prefix: &'a str,
    region: &'a str,
}

impl<'a> LogTarget<'a> {
    fn from_container(container: &'a ContainerDefinition) -> Option<Self> {
        let config = container.log_configuration.as_ref()?;
        if config.log_driver != AWSLOGS_DRIVER {
            debug!(container = %container.name, driver = %config.log_driver, "Skipping unsupported log driver");
            return None;
        }

        let option = |key: &str| config.options.get(key).map(String::as_str).filter(|v| !v.is_empty());
        match (option(OPTION_GROUP), option(OPTION_STREAM_PREFIX), option(OPTION_REGION)) {
            (Some(group), Some(stream_prefix), Some(region)) => Some(Self {
                container: &container.name,
                group,
                stream_prefix,
                region,
            }),
            _ => {
                error!(
                    container = %container.name,
                    "Log group, stream prefix or region is not defined for container"
                );
                None
            }
        }
    }

    /// `awslogs` stream name: `prefix/container/task-id`.
    fn stream(&self, task_id: &str) -> String {
        format!("{}/{}/{}", self.stream_prefix, self.container, task_id)
    }

    fn console_url(&self, task_id: &str) -> String {
        format!(
            "https://{region}.console.aws.amazon.com/cloudwatch/home?region={region}#logsV2:log-groups/log-group/{group}/log-events/{prefix}%2F{container}%2F{task}",
            region = self.region,
            group = urlencoding::encode(self.group),
            prefix = urlencoding::encode(self.stream_prefix),
            container = urlencoding::encode(self.container),
            task = task_id,
        )
    }
}

/// Fence the last [`LOG_LINES_PER_CONTAINER`] events, oldest first.
fn code_block(events: &[LogEvent]) -> String {
    let tail = &events[events.len().saturating_sub(LOG_LINES_PER_CONTAINER)..];
    let mut block = String::from("```");
    for event in tail {
        block.push_str(&event.message);
        block.push('\n');
    }
    block.push_str("```");
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const TASK_DEFINITION_ARN: &str = "arn:aws:ecs:us-east-1:111122223333:task-definition/myapp:7";

    struct Definitions(Result<Vec<ContainerDefinition>, String>);

    #[async_trait]
    impl TaskDefinitionLookup for Definitions {
        async fn container_definitions(&self, _arn: &str) -> Result<Vec<ContainerDefinition>, SourceError> {
            self.0.clone().map_err(SourceError::Unavailable)
        }
    }

    #[derive(Default)]
    struct Logs {
        queries: Mutex<Vec<LogQuery>>,
        events: Vec<LogEvent>,
        fail: bool,
    }

    #[async_trait]
    impl LogStore for Logs {
        async fn recent_events(&self, query: &LogQuery) -> Result<Vec<LogEvent>, SourceError> {
            self.queries.lock().unwrap().push(query.clone());
            if self.fail {
                return Err(SourceError::Unavailable("throttled".to_string()));
            }
            Ok(self.events.clone())
        }
    }

    fn enricher(definitions: Vec<ContainerDefinition>, logs: Arc<Logs>) -> LogEnricher {
        LogEnricher::new(Arc::new(Definitions(Ok(definitions))), logs)
    }

    #[tokio::test]
    async fn test_link_and_log_lines() {
        let logs = Arc::new(Logs {
            events: vec![LogEvent::new(1, "starting"), LogEvent::new(2, "panic: boom")],
            ..Default::default()
        });
        let enricher = enricher(
            vec![ContainerDefinition::awslogs("web", "/ecs/myapp", "ecs", "us-east-1")],
            logs.clone(),
        );

        let lines = enricher.enrich(TASK_DEFINITION_ARN, "abc123").await;
        assert_eq!(
            lines,
            vec![
                " [Logs web](https://us-east-1.console.aws.amazon.com/cloudwatch/home?region=us-east-1#logsV2:log-groups/log-group/%2Fecs%2Fmyapp/log-events/ecs%2Fweb%2Fabc123)".to_string(),
                "```starting\npanic: boom\n```".to_string(),
            ]
        );

        let queries = logs.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0], LogQuery::tail("/ecs/myapp", "ecs/web/abc123"));
        assert_eq!(queries[0].limit, 10);
        assert!(!queries[0].start_from_head);
    }

    #[tokio::test]
    async fn test_log_lines_capped_when_store_returns_more() {
        let logs = Arc::new(Logs {
            events: (1..=15).map(|i| LogEvent::new(i, format!("line {}", i))).collect(),
            ..Default::default()
        });
        let enricher = enricher(
            vec![ContainerDefinition::awslogs("web", "/ecs/myapp", "ecs", "us-east-1")],
            logs,
        );

        let lines = enricher.enrich(TASK_DEFINITION_ARN, "abc123").await;
        let block = &lines[1];
        assert_eq!(block.matches('\n').count(), LOG_LINES_PER_CONTAINER);
        assert!(block.starts_with("```line 6\n"));
        assert!(block.ends_with("line 15\n```"));
    }

    #[tokio::test]
    async fn test_skips_non_essential_and_other_drivers() {
        let logs = Arc::new(Logs::default());
        let mut firelens = ContainerDefinition::awslogs("router", "/ecs/router", "ecs", "us-east-1");
        if let Some(config) = firelens.log_configuration.as_mut() {
            config.log_driver = "awsfirelens".to_string();
        }
        let enricher = enricher(
            vec![
                ContainerDefinition::awslogs("xray", "/ecs/xray", "ecs", "us-east-1").with_essential(false),
                firelens,
                ContainerDefinition {
                    name: "bare".to_string(),
                    essential: true,
                    log_configuration: None,
                },
            ],
            logs.clone(),
        );

        assert!(enricher.enrich(TASK_DEFINITION_ARN, "abc123").await.is_empty());
        assert!(logs.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_log_options_are_skipped() {
        let logs = Arc::new(Logs::default());
        let mut incomplete = ContainerDefinition::awslogs("web", "/ecs/myapp", "ecs", "us-east-1");
        if let Some(config) = incomplete.log_configuration.as_mut() {
            config.options.remove(OPTION_REGION);
        }
        let enricher = enricher(
            vec![incomplete, ContainerDefinition::awslogs("worker", "/ecs/myapp", "ecs", "us-east-1")],
            logs.clone(),
        );

        let lines = enricher.enrich(TASK_DEFINITION_ARN, "abc123").await;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(" [Logs worker]"));
    }

    #[tokio::test]
    async fn test_log_fetch_failure_keeps_link() {
        let logs = Arc::new(Logs {
            fail: true,
            ..Default::default()
        });
        let enricher = enricher(
            vec![ContainerDefinition::awslogs("web", "/ecs/myapp", "ecs", "us-east-1")],
            logs,
        );

        let lines = enricher.enrich(TASK_DEFINITION_ARN, "abc123").await;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(" [Logs web]"));
    }

    #[tokio::test]
    async fn test_lookup_failure_yields_nothing() {
        let enricher = LogEnricher::new(
            Arc::new(Definitions(Err("access denied".to_string()))),
            Arc::new(Logs::default()),
        );
        assert!(enricher.enrich(TASK_DEFINITION_ARN, "abc123").await.is_empty());
    }

    #[test]
    fn test_container_definition_wire_format() {
        let raw = serde_json::json!({
            "name": "web",
            "essential": true,
            "image": "nginx",
            "logConfiguration": {
                "logDriver": "awslogs",
                "options": {
                    "awslogs-group": "/ecs/myapp",
                    "awslogs-stream-prefix": "ecs",
                    "awslogs-region": "us-east-1"
                }
            }
        });
        let parsed: ContainerDefinition = serde_json::from_value(raw).unwrap();
        assert_eq!(
            parsed,
            ContainerDefinition::awslogs("web", "/ecs/myapp", "ecs", "us-east-1")
        );
    }
}
