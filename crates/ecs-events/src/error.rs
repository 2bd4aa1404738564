//! Error types for ecs-events.

use thiserror::Error;

/// Errors raised while rendering an event's `detail` object.
///
/// Malformed ARNs never produce one of these; they degrade to the raw value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A field the event type requires is absent.
    #[error("{detail_type}: missing required field `{field}`")]
    MissingField {
        detail_type: String,
        field: String,
    },

    /// A field is present but has the wrong JSON type.
    #[error("{detail_type}: field `{field}` must be {expected}")]
    InvalidField {
        detail_type: String,
        field: String,
        expected: &'static str,
    },
}

/// Errors returned by the task-definition and log-store collaborators.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The collaborator could not be reached or refused the request.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The requested task definition or log stream does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Errors that can occur while classifying an event.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The event violates the upstream contract.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
