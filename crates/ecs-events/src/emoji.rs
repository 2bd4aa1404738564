//! Slack emoji annotations for ECS event fields.
//!
//! Unknown values map to an empty string rather than an error.

/// Severity of a deployment or service action event (`detail.eventType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Error,
    Warn,
    Info,
}

impl EventType {
    /// Parse the ECS event type name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ERROR" => Some(Self::Error),
            "WARN" => Some(Self::Warn),
            "INFO" => Some(Self::Info),
            _ => None,
        }
    }

    /// Get the emoji shortcode.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Error => ":exclamation:",
            Self::Warn => ":warning:",
            Self::Info => ":information_source:",
        }
    }
}

/// Deployment lifecycle event name (`detail.eventName`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentEvent {
    InProgress,
    Completed,
    Failed,
}

impl DeploymentEvent {
    /// Parse the ECS event name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SERVICE_DEPLOYMENT_IN_PROGRESS" => Some(Self::InProgress),
            "SERVICE_DEPLOYMENT_COMPLETED" => Some(Self::Completed),
            "SERVICE_DEPLOYMENT_FAILED" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Get the emoji shortcode.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::InProgress => ":arrows_counterclockwise:",
            Self::Completed => ":white_check_mark:",
            Self::Failed => ":x:",
        }
    }
}

/// Task lifecycle status (`detail.lastStatus` / `detail.desiredStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Provisioning,
    Pending,
    Activating,
    Running,
    Deactivating,
    Stopping,
    Deprovisioning,
    Stopped,
}

impl TaskStatus {
    /// Parse the ECS task status name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PROVISIONING" => Some(Self::Provisioning),
            "PENDING" => Some(Self::Pending),
            "ACTIVATING" => Some(Self::Activating),
            "RUNNING" => Some(Self::Running),
            "DEACTIVATING" => Some(Self::Deactivating),
            "STOPPING" => Some(Self::Stopping),
            "DEPROVISIONING" => Some(Self::Deprovisioning),
            "STOPPED" => Some(Self::Stopped),
            _ => None,
        }
    }

    /// Get the emoji shortcode.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Provisioning => ":clock1:",
            Self::Pending => ":clock6:",
            Self::Activating => ":clock11:",
            Self::Running => ":up:",
            Self::Deactivating => ":arrow_backward:",
            Self::Stopping => ":rewind:",
            Self::Deprovisioning => ":black_left_pointing_double_triangle_with_vertical_bar:",
            Self::Stopped => ":black_square_for_stop:",
        }
    }
}

pub fn event_type_emoji(value: &str) -> &'static str {
    EventType::parse(value).map_or("", |t| t.emoji())
}

pub fn deployment_event_emoji(value: &str) -> &'static str {
    DeploymentEvent::parse(value).map_or("", |e| e.emoji())
}

pub fn task_status_emoji(value: &str) -> &'static str {
    TaskStatus::parse(value).map_or("", |s| s.emoji())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(event_type_emoji("ERROR"), ":exclamation:");
        assert_eq!(deployment_event_emoji("SERVICE_DEPLOYMENT_FAILED"), ":x:");
        assert_eq!(task_status_emoji("RUNNING"), ":up:");
        assert_eq!(task_status_emoji("STOPPED"), ":black_square_for_stop:");
    }

    #[test]
    fn test_unknown_values_are_empty() {
        assert_eq!(event_type_emoji("DEBUG"), "");
        assert_eq!(deployment_event_emoji("SERVICE_STEADY_STATE"), "");
        assert_eq!(task_status_emoji("running"), "");
    }

    #[test]
    fn test_all_task_statuses_have_emoji() {
        let names = [
            "PROVISIONING",
            "PENDING",
            "ACTIVATING",
            "RUNNING",
            "DEACTIVATING",
            "STOPPING",
            "DEPROVISIONING",
            "STOPPED",
        ];
        for name in names {
            let status = TaskStatus::parse(name).unwrap();
            assert!(!status.emoji().is_empty(), "{} has no emoji", name);
        }
    }
}
