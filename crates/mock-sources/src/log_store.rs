//! Static log store with query recording.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ecs_events::{LogEvent, LogQuery, LogStore, SourceError};

/// Log events held in memory, keyed by `(log group, log stream)`.
///
/// Every query is recorded so tests can check what was asked for.
#[derive(Debug, Clone, Default)]
pub struct StaticLogStore {
    streams: HashMap<(String, String), Vec<LogEvent>>,
    queries: Arc<Mutex<Vec<LogQuery>>>,
}

impl StaticLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the events of a stream, oldest first.
    pub fn with_events(
        mut self,
        log_group: impl Into<String>,
        log_stream: impl Into<String>,
        events: Vec<LogEvent>,
    ) -> Self {
        self.insert(log_group, log_stream, events);
        self
    }

    pub fn insert(&mut self, log_group: impl Into<String>, log_stream: impl Into<String>, events: Vec<LogEvent>) {
        self.streams.insert((log_group.into(), log_stream.into()), events);
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<LogQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LogStore for StaticLogStore {
    async fn recent_events(&self, query: &LogQuery) -> Result<Vec<LogEvent>, SourceError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }

        let key = (query.log_group.clone(), query.log_stream.clone());
        let events = self.streams.get(&key).ok_or_else(|| {
            SourceError::NotFound(format!("{}/{}", query.log_group, query.log_stream))
        })?;

        let window = if query.start_from_head {
            &events[..events.len().min(query.limit)]
        } else {
            &events[events.len().saturating_sub(query.limit)..]
        };
        Ok(window.to_vec())
    }
}
