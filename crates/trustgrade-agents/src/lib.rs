//! Live collaborators for the review and company analysis tasks.
//!
//! Each analyst runs one Tavily web search, folds the results into a prompt
//! and returns the Gemini model's raw reply. Parsing that reply is left to
//! `trustgrade-analysis`.

pub mod analysts;
pub mod error;
pub mod gemini;
pub mod prompts;
pub mod tavily;

pub use analysts::{build_orchestrator, CompanyAnalyst, ReviewAnalyst};
pub use error::AgentError;
pub use gemini::{GeminiClient, GenerationSettings};
pub use tavily::{SearchDigest, SearchHit, TavilyClient};

use reqwest::Url;

/// Longest error body echoed back in [`AgentError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Ensures the base URL ends with exactly one slash so relative joins
/// append to it rather than replacing its last path segment.
pub(crate) fn normalise_base_url(base_url: &str) -> Result<Url, AgentError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| AgentError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

pub(crate) fn error_excerpt(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
