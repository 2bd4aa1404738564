//! Static task-definition lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use ecs_events::{ContainerDefinition, SourceError, TaskDefinitionLookup};

/// Task definitions held in memory, keyed by ARN.
#[derive(Debug, Clone, Default)]
pub struct StaticTaskDefinitions {
    definitions: HashMap<String, Vec<ContainerDefinition>>,
}

impl StaticTaskDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the container definitions of a task definition.
    pub fn with_task_definition(
        mut self,
        task_definition_arn: impl Into<String>,
        containers: Vec<ContainerDefinition>,
    ) -> Self {
        self.insert(task_definition_arn, containers);
        self
    }

    pub fn insert(&mut self, task_definition_arn: impl Into<String>, containers: Vec<ContainerDefinition>) {
        self.definitions.insert(task_definition_arn.into(), containers);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[async_trait]
impl TaskDefinitionLookup for StaticTaskDefinitions {
    async fn container_definitions(
        &self,
        task_definition_arn: &str,
    ) -> Result<Vec<ContainerDefinition>, SourceError> {
        self.definitions
            .get(task_definition_arn)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(task_definition_arn.to_string()))
    }
}
