use thiserror::Error;

/// Why a task's raw output did not yield a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no JSON object found in task output")]
    NoJsonFound,

    #[error("JSON object in task output is truncated or has unbalanced braces")]
    UnbalancedBraces,

    #[error("invalid JSON in task output: {0}")]
    InvalidJson(String),
}

/// Failure of a collaborator to produce any output for a task.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{service} call failed: {message}")]
    Collaborator { service: String, message: String },

    #[error("task returned empty output")]
    EmptyOutput,

    #[error("live analysis is not configured: {0}")]
    NotConfigured(String),
}
