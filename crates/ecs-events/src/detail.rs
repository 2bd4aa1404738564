//! Per-type rendering of the event `detail` object.
//!
//! Every known ECS event type gets a short mrkdwn summary with status emoji.
//! Anything else is dumped as indented JSON. Stopped tasks go through the
//! [`SuppressionPolicy`] before their stop lines are rendered.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::warn;

use crate::arn::{self, PathPart};
use crate::emoji::{deployment_event_emoji, event_type_emoji, task_status_emoji};
use crate::error::FormatError;
use crate::suppression::{SuppressionPolicy, SuppressionVerdict};

/// The event types with a dedicated renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    ContainerInstanceStateChange,
    DeploymentStateChange,
    ServiceAction,
    TaskStateChange,
    Other,
}

impl DetailKind {
    /// Classify an EventBridge `detail-type`.
    pub fn from_detail_type(detail_type: &str) -> Self {
        match detail_type {
            "ECS Container Instance State Change" => Self::ContainerInstanceStateChange,
            "ECS Deployment State Change" => Self::DeploymentStateChange,
            "ECS Service Action" => Self::ServiceAction,
            "ECS Task State Change" => Self::TaskStateChange,
            _ => Self::Other,
        }
    }
}

/// A rendered summary, kept as lines until it is joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    lines: Vec<String>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, lines: I) {
        self.lines.extend(lines);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join the lines into the final mrkdwn text.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Identifiers of the task behind a Task State Change, for log lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContext {
    pub task_definition_arn: String,
    /// `None` when the task ARN could not be parsed.
    pub task_id: Option<String>,
}

/// Output of the formatter for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedDetail {
    /// The event should be notified with this summary.
    Summary {
        summary: Summary,
        task: Option<TaskContext>,
    },
    /// The event was suppressed and must be dropped.
    Skip { reason: String },
}

/// Renders `detail` objects for the known ECS event types.
#[derive(Debug, Clone, Default)]
pub struct DetailFormatter {
    suppression: SuppressionPolicy,
}

impl DetailFormatter {
    pub fn new(suppression: SuppressionPolicy) -> Self {
        Self { suppression }
    }

    /// Render an event's detail.
    ///
    /// Returns an error only when a field the event type requires is missing
    /// or has the wrong type.
    pub fn format(&self, detail_type: &str, detail: &Map<String, Value>) -> Result<FormattedDetail, FormatError> {
        let fields = Fields { detail_type, detail };
        let summary = match DetailKind::from_detail_type(detail_type) {
            DetailKind::ContainerInstanceStateChange => container_instance_state_change(&fields)?,
            DetailKind::DeploymentStateChange => deployment_state_change(&fields)?,
            DetailKind::ServiceAction => service_action(&fields)?,
            DetailKind::TaskStateChange => return self.task_state_change(&fields),
            DetailKind::Other => generic_summary(detail),
        };

        Ok(FormattedDetail::Summary { summary, task: None })
    }

    fn task_state_change(&self, fields: &Fields<'_>) -> Result<FormattedDetail, FormatError> {
        let task_definition_arn = fields.required("taskDefinitionArn")?;
        let last_status = fields.required("lastStatus")?;
        let desired_status = fields.required("desiredStatus")?;
        let task_arn = fields.required("taskArn")?;

        // Suppression runs before anything else is rendered
        if last_status == "STOPPED" {
            let verdict = self
                .suppression
                .evaluate(fields.optional("stopCode")?, fields.optional("stoppedReason")?);
            if let SuppressionVerdict::Skip(reason) = verdict {
                return Ok(FormattedDetail::Skip { reason });
            }
        }

        let task_id = match arn::extract(task_arn, PathPart::Id) {
            Some(id) => Some(id.to_string()),
            None => {
                warn!(field = "taskArn", arn = %task_arn, "Error parsing ARN, task id unresolved");
                None
            }
        };

        let mut summary = Summary::new();
        summary.push("*Event Detail:* ");
        summary.push(format!(
            "• Task Definition: {}",
            arn::task_definition_or_raw(task_definition_arn)
        ));
        summary.push(format!("• Last: {} {}", last_status, task_status_emoji(last_status)));
        summary.push(format!(
            "• Desired: {} {}",
            desired_status,
            task_status_emoji(desired_status)
        ));

        if let Some(instance_arn) = fields.optional("containerInstanceArn")? {
            summary.push(format!(
                "• Instance ID: {}",
                arn::short_name(instance_arn, PathPart::Id, "containerInstanceArn")
            ));
        }

        if last_status == "RUNNING" {
            if let Some(health) = fields.optional("healthStatus")? {
                summary.push(format!("• HealthStatus: {}", health));
            }
        }

        if last_status == "STOPPED" {
            if let Some(stop_code) = fields.optional("stopCode")? {
                summary.push(format!(":bangbang: Stop Code: {}", stop_code));
            }
            if let Some(reason) = fields.optional("stoppedReason")? {
                summary.push(format!(":bangbang: Stop Reason: {}", reason));
            }
            if let Some(containers) = fields.optional_array("containers")? {
                summary.push("Task containers and their exit code:");
                for container in containers {
                    summary.push(container_exit_line(fields.detail_type, container)?);
                }
            }
        }

        Ok(FormattedDetail::Summary {
            summary,
            task: Some(TaskContext {
                task_definition_arn: task_definition_arn.to_string(),
                task_id,
            }),
        })
    }
}

/// Render `detail` as the generic fenced JSON dump.
pub fn generic_dump(detail: &Map<String, Value>) -> String {
    format!("```{}```", pretty_json(detail))
}

fn generic_summary(detail: &Map<String, Value>) -> Summary {
    let mut summary = Summary::new();
    summary.push(format!("*Event Detail:* {}", generic_dump(detail)));
    summary
}

/// JSON with four-space indentation.
fn pretty_json(detail: &Map<String, Value>) -> String {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    // Serializing a Map into a Vec cannot fail
    if detail.serialize(&mut serializer).is_err() {
        return Value::Object(detail.clone()).to_string();
    }
    String::from_utf8(buf).unwrap_or_default()
}

fn container_instance_state_change(fields: &Fields<'_>) -> Result<Summary, FormatError> {
    let mut summary = Summary::new();
    summary.push(format!("*Instance ID:* {}", fields.required("ec2InstanceId")?));
    summary.push(format!("• Status: {}", fields.required("status")?));
    if let Some(reason) = fields.optional("statusReason")? {
        summary.push(format!("• Reason: {}", reason));
    }
    Ok(summary)
}

fn deployment_state_change(fields: &Fields<'_>) -> Result<Summary, FormatError> {
    let mut summary = event_header(fields)?;
    summary.push(format!("• Deployment: {}", fields.required("deploymentId")?));
    summary.push(format!("• Reason: {}", fields.required("reason")?));
    Ok(summary)
}

fn service_action(fields: &Fields<'_>) -> Result<Summary, FormatError> {
    let mut summary = event_header(fields)?;
    if let Some(arns) = fields.optional_array("capacityProviderArns")? {
        let names: Vec<&str> = arns
            .iter()
            .map(|value| match value.as_str() {
                Some(arn) => Ok(arn::short_name(arn, PathPart::Name, "capacityProviderArns")),
                None => Err(fields.invalid("capacityProviderArns", "an array of strings")),
            })
            .collect::<Result<_, _>>()?;
        if !names.is_empty() {
            summary.push(format!("• Capacity Providers: {}", names.join(", ")));
        }
    }
    Ok(summary)
}

/// Header and type/name line shared by deployment and service events.
fn event_header(fields: &Fields<'_>) -> Result<Summary, FormatError> {
    let event_type = fields.required("eventType")?;
    let event_name = fields.required("eventName")?;

    let mut summary = Summary::new();
    summary.push(format!(
        "*Event Detail:*{}{}",
        event_type_emoji(event_type),
        deployment_event_emoji(event_name)
    ));
    summary.push(format!("• {} - {}", event_type, event_name));
    Ok(summary)
}

fn container_exit_line(detail_type: &str, container: &Value) -> Result<String, FormatError> {
    let name = container
        .get("name")
        .ok_or_else(|| FormatError::MissingField {
            detail_type: detail_type.to_string(),
            field: "containers[].name".to_string(),
        })?
        .as_str()
        .ok_or_else(|| FormatError::InvalidField {
            detail_type: detail_type.to_string(),
            field: "containers[].name".to_string(),
            expected: "a string",
        })?;

    let exit_code = match container.get("exitCode") {
        None | Some(Value::Null) => "unknown".to_string(),
        Some(Value::String(code)) => code.clone(),
        Some(other) => other.to_string(),
    };

    Ok(format!(" - {}: {}", name, exit_code))
}

/// Typed access to `detail` fields with contract errors.
struct Fields<'a> {
    detail_type: &'a str,
    detail: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn required(&self, field: &str) -> Result<&'a str, FormatError> {
        self.optional(field)?.ok_or_else(|| FormatError::MissingField {
            detail_type: self.detail_type.to_string(),
            field: field.to_string(),
        })
    }

    fn optional(&self, field: &str) -> Result<Option<&'a str>, FormatError> {
        match self.detail.get(field) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(self.invalid(field, "a string")),
        }
    }

    fn optional_array(&self, field: &str) -> Result<Option<&'a Vec<Value>>, FormatError> {
        match self.detail.get(field) {
            None => Ok(None),
            Some(Value::Array(values)) => Ok(Some(values)),
            Some(_) => Err(self.invalid(field, "an array")),
        }
    }

    fn invalid(&self, field: &str, expected: &'static str) -> FormatError {
        FormatError::InvalidField {
            detail_type: self.detail_type.to_string(),
            field: field.to_string(),
            expected,
        }
    }
}
