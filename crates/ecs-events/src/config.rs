//! Engine configuration.

use std::env;

use crate::error::EngineError;
use crate::suppression::SuppressionPolicy;

/// Configuration for the [`NotificationEngine`](crate::NotificationEngine).
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Log every inbound event at info level.
    pub log_events: bool,
    /// Append recent container logs to task notifications.
    pub fetch_task_logs: bool,
    /// Stopped-task suppression lists.
    pub suppression: SuppressionPolicy,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `LOG_EVENTS` - log inbound events (default: false)
    /// - `GET_ECS_TASK_LOGS` - fetch container logs for task events (default: false)
    /// - `SKIP_STOP_CODES` - comma-separated stop codes to suppress
    /// - `SKIP_STOPPED_REASONS` - comma-separated stopped-reason fragments to suppress
    pub fn from_env() -> Result<Self, EngineError> {
        let log_events = env_flag("LOG_EVENTS")?;
        let fetch_task_logs = env_flag("GET_ECS_TASK_LOGS")?;
        let stop_codes = env_list("SKIP_STOP_CODES")?;
        let reasons = env_list("SKIP_STOPPED_REASONS")?;

        Ok(Self {
            log_events,
            fetch_task_logs,
            suppression: SuppressionPolicy::new(stop_codes, reasons),
        })
    }

    /// Builder method to set the suppression lists.
    pub fn with_suppression(mut self, suppression: SuppressionPolicy) -> Self {
        self.suppression = suppression;
        self
    }

    /// Builder method to enable or disable log enrichment.
    pub fn with_task_logs(mut self, enabled: bool) -> Self {
        self.fetch_task_logs = enabled;
        self
    }

    /// Builder method to enable or disable inbound event logging.
    pub fn with_event_logging(mut self, enabled: bool) -> Self {
        self.log_events = enabled;
        self
    }
}

/// Interpret a boolean setting. Accepts `true`, `1`, `t`, `yes`, `y`.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "t" | "yes" | "y"
    )
}

/// Split a comma-separated setting, dropping blank entries.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_var(name: &str) -> Result<Option<String>, EngineError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(EngineError::Config(format!("{} is not valid unicode", name)))
        }
    }
}

fn env_flag(name: &str) -> Result<bool, EngineError> {
    Ok(env_var(name)?.is_some_and(|value| parse_flag(&value)))
}

fn env_list(name: &str) -> Result<Vec<String>, EngineError> {
    Ok(env_var(name)?.map(|value| parse_list(&value)).unwrap_or_default())
}
