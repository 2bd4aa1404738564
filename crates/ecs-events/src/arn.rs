//! ARN short-name extraction.
//!
//! ARNs look like `arn:partition:service:region:account:resource-path`. The
//! resource path is split on `/` and one part is picked depending on what
//! the ARN names. Extraction never fails past this module: malformed input
//! is logged once and the raw value is used instead.

use tracing::warn;

/// Index of the resource path among the colon-separated ARN segments.
const RESOURCE_SEGMENT: usize = 5;

/// Index of the task-definition revision among the colon-separated segments.
const REVISION_SEGMENT: usize = 6;

/// Which part of the `/`-separated resource path to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPart {
    /// `cluster/<name>`, `task-definition/<family>`, `capacity-provider/<name>`.
    Name,
    /// `task/<cluster>/<id>`, `container-instance/<cluster>/<id>`.
    Id,
}

impl PathPart {
    /// The part that names a resource of the given type (`task`, `cluster`, ...).
    pub fn for_resource_type(resource_type: &str) -> Self {
        match resource_type {
            "task" | "container-instance" => Self::Id,
            _ => Self::Name,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Name => 1,
            Self::Id => 2,
        }
    }
}

/// Extract a path part from an ARN, or `None` if the ARN is malformed.
pub fn extract(arn: &str, part: PathPart) -> Option<&str> {
    arn.split(':')
        .nth(RESOURCE_SEGMENT)?
        .split('/')
        .nth(part.index())
}

/// Extract a path part, falling back to the raw ARN.
///
/// `label` names the field in the diagnostic, e.g. "containerInstanceArn".
pub fn short_name<'a>(arn: &'a str, part: PathPart, label: &str) -> &'a str {
    match extract(arn, part) {
        Some(name) => name,
        None => {
            warn!(field = label, arn = %arn, "Error parsing ARN, using raw value");
            arn
        }
    }
}

/// The resource type of an ARN: the resource path up to its first `/`.
pub fn resource_type(arn: &str) -> Option<&str> {
    arn.split(':').nth(RESOURCE_SEGMENT)?.split('/').next()
}

/// Render a task-definition ARN as `family:revision`, or `None` if malformed.
pub fn task_definition(arn: &str) -> Option<String> {
    let family = extract(arn, PathPart::Name)?;
    let revision = arn.split(':').nth(REVISION_SEGMENT)?;
    Some(format!("{}:{}", family, revision))
}

/// Render a task-definition ARN as `family:revision`, falling back to the raw ARN.
pub fn task_definition_or_raw(arn: &str) -> String {
    task_definition(arn).unwrap_or_else(|| {
        warn!(field = "taskDefinitionArn", arn = %arn, "Error parsing ARN, using raw value");
        arn.to_string()
    })
}

/// A resource listed on an event, with its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    /// The ARN exactly as received.
    pub arn: String,
    /// Short display name, or the ARN if it could not be parsed.
    pub short_name: String,
}

impl ResourceRef {
    /// Parse a resource ARN. Never fails.
    pub fn parse(arn: impl Into<String>) -> Self {
        let arn = arn.into();
        let part = resource_type(&arn).map_or(PathPart::Name, PathPart::for_resource_type);
        let short_name = short_name(&arn, part, "resources").to_string();
        Self { arn, short_name }
    }

    /// Parse every ARN in an event's resource list, keeping order.
    pub fn parse_all(arns: &[String]) -> Vec<Self> {
        arns.iter().map(|arn| Self::parse(arn.as_str())).collect()
    }

    /// The resource line shown in messages.
    pub fn display_line(&self) -> String {
        format!(":dart: {}", self.short_name)
    }
}
