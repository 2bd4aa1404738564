//! JSON fixtures for running enrichment locally.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ecs_events::{ContainerDefinition, LogEvent};
use serde::{de, Deserialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::log_store::StaticLogStore;
use crate::task_definitions::StaticTaskDefinitions;

/// Errors that can occur while loading fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The fixture file is not valid JSON for the fixture schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Task definitions and log streams loaded from a file.
///
/// ```json
/// {
///   "taskDefinitions": {
///     "arn:aws:ecs:...:task-definition/myapp:7": [{"name": "web", "essential": true, "logConfiguration": {...}}]
///   },
///   "logStreams": [
///     {"logGroup": "/ecs/myapp", "logStream": "ecs/web/abc123", "events": [{"timestamp": 1, "message": "hi"}]}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    #[serde(default)]
    pub task_definitions: HashMap<String, Vec<ContainerDefinition>>,
    #[serde(default)]
    pub log_streams: Vec<LogStreamFixture>,
}

/// The events of one log stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStreamFixture {
    pub log_group: String,
    pub log_stream: String,
    #[serde(default)]
    pub events: Vec<LogEvent>,
}

impl Fixtures {
    /// Load fixtures from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let fixtures = Self::from_json(&data)?;
        info!(
            path = %path.display(),
            task_definitions = fixtures.task_definitions.len(),
            log_streams = fixtures.log_streams.len(),
            "Loaded log source fixtures"
        );
        Ok(fixtures)
    }

    /// Parse fixtures from a JSON string. The document must be an object.
    pub fn from_json(data: &str) -> Result<Self, FixtureError> {
        let value: Value = serde_json::from_str(data)?;
        if !value.is_object() {
            return Err(FixtureError::Json(de::Error::custom(
                "fixtures must be a JSON object with taskDefinitions and logStreams",
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Build the static sources.
    pub fn into_sources(self) -> (StaticTaskDefinitions, StaticLogStore) {
        let mut definitions = StaticTaskDefinitions::new();
        for (arn, containers) in self.task_definitions {
            definitions.insert(arn, containers);
        }

        let mut logs = StaticLogStore::new();
        for stream in self.log_streams {
            logs.insert(stream.log_group, stream.log_stream, stream.events);
        }

        (definitions, logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecs_events::{LogQuery, LogStore, TaskDefinitionLookup};

    const FIXTURES: &str = r#"{
        "taskDefinitions": {
            "arn:aws:ecs:us-east-1:111122223333:task-definition/myapp:7": [
                {
                    "name": "web",
                    "essential": true,
                    "logConfiguration": {
                        "logDriver": "awslogs",
                        "options": {
                            "awslogs-group": "/ecs/myapp",
                            "awslogs-stream-prefix": "ecs",
                            "awslogs-region": "us-east-1"
                        }
                    }
                }
            ]
        },
        "logStreams": [
            {
                "logGroup": "/ecs/myapp",
                "logStream": "ecs/web/abc123",
                "events": [{"timestamp": 1, "message": "hello", "ingestionTime": 2}]
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_fixtures_build_sources() {
        let (definitions, logs) = Fixtures::from_json(FIXTURES).unwrap().into_sources();

        let containers = definitions
            .container_definitions("arn:aws:ecs:us-east-1:111122223333:task-definition/myapp:7")
            .await
            .unwrap();
        assert_eq!(containers[0].name, "web");

        let events = logs
            .recent_events(&LogQuery::tail("/ecs/myapp", "ecs/web/abc123"))
            .await
            .unwrap();
        assert_eq!(events[0].message, "hello");
        assert_eq!(events[0].ingestion_time, Some(2));
    }

    #[test]
    fn test_empty_fixtures() {
        let fixtures = Fixtures::from_json("{}").unwrap();
        let (definitions, _) = fixtures.into_sources();
        assert!(definitions.is_empty());
    }

    #[test]
    fn test_invalid_fixtures() {
        assert!(matches!(Fixtures::from_json("[]"), Err(FixtureError::Json(_))));
        assert!(matches!(Fixtures::from_json("null"), Err(FixtureError::Json(_))));
        assert!(matches!(Fixtures::from_json("{"), Err(FixtureError::Json(_))));
    }
}
