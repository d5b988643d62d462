use thiserror::Error;
use trustgrade_analysis::TaskError;
use trustgrade_core::ConfigError;

/// Errors returned by the Gemini and Tavily clients.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("{service} API error (status {status}): {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The model answered without any text.
    #[error("{service} returned no text")]
    EmptyResponse { service: &'static str },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AgentError {
    fn service(&self) -> &'static str {
        match self {
            AgentError::Api { service, .. } | AgentError::EmptyResponse { service } => *service,
            _ => "collaborator",
        }
    }
}

impl From<AgentError> for TaskError {
    fn from(e: AgentError) -> Self {
        match e {
            AgentError::EmptyResponse { .. } => TaskError::EmptyOutput,
            AgentError::Config(inner) => TaskError::NotConfigured(inner.to_string()),
            other => TaskError::Collaborator {
                service: other.service().to_string(),
                message: other.to_string(),
            },
        }
    }
}
