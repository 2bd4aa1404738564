//! A source that always fails.

use async_trait::async_trait;
use ecs_events::{ContainerDefinition, LogEvent, LogQuery, LogStore, SourceError, TaskDefinitionLookup};

/// Fails every lookup and fetch with [`SourceError::Unavailable`].
#[derive(Debug, Clone)]
pub struct FailingSource {
    message: String,
}

impl FailingSource {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingSource {
    fn default() -> Self {
        Self::new("source unavailable")
    }
}

#[async_trait]
impl TaskDefinitionLookup for FailingSource {
    async fn container_definitions(&self, _task_definition_arn: &str) -> Result<Vec<ContainerDefinition>, SourceError> {
        Err(SourceError::Unavailable(self.message.clone()))
    }
}

#[async_trait]
impl LogStore for FailingSource {
    async fn recent_events(&self, _query: &LogQuery) -> Result<Vec<LogEvent>, SourceError> {
        Err(SourceError::Unavailable(self.message.clone()))
    }
}
