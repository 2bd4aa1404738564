//! In-memory log sources for ECS notification processing.
//!
//! This crate provides implementations of the `ecs-events` collaborator
//! traits that need no AWS access:
//! - `StaticTaskDefinitions` - Container definitions keyed by task definition ARN
//! - `StaticLogStore` - Log events keyed by log group and stream, with query recording
//! - `FailingSource` - Always fails, for exercising degraded enrichment
//! - `Fixtures` - Loads both static sources from a JSON file for local runs
//!
//! # Example
//!
//! ```rust
//! use mock_sources::{StaticLogStore, StaticTaskDefinitions};
//! use ecs_events::{ContainerDefinition, LogEnricher, LogEvent};
//! use std::sync::Arc;
//!
//! let arn = "arn:aws:ecs:us-east-1:111122223333:task-definition/myapp:7";
//! let definitions = StaticTaskDefinitions::new().with_task_definition(
//!     arn,
//!     vec![ContainerDefinition::awslogs("web", "/ecs/myapp", "ecs", "us-east-1")],
//! );
//! let logs = StaticLogStore::new()
//!     .with_events("/ecs/myapp", "ecs/web/abc123", vec![LogEvent::new(1, "hello")]);
//!
//! let enricher = LogEnricher::new(Arc::new(definitions), Arc::new(logs));
//! ```

mod failing;
mod fixtures;
mod log_store;
mod task_definitions;

// Re-export ecs-events collaborator types for convenience
pub use ecs_events::{
    async_trait, ContainerDefinition, LogEvent, LogQuery, LogStore, SourceError, TaskDefinitionLookup,
};

pub use failing::FailingSource;
pub use fixtures::{FixtureError, Fixtures, LogStreamFixture};
pub use log_store::StaticLogStore;
pub use task_definitions::StaticTaskDefinitions;
