//! HTTP client for the Tavily search API.

use std::fmt::Write as _;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::{error_excerpt, normalise_base_url};

const DEFAULT_BASE_URL: &str = "https://api.tavily.com/";
const SERVICE: &str = "tavily";
const CHUNKS_PER_SOURCE: u32 = 3;
/// Cap on page text copied into a prompt per hit.
const MAX_RAW_CONTENT_CHARS: usize = 1_500;

/// Client for Tavily's `/search` endpoint.
pub struct TavilyClient {
    client: Client,
    api_key: String,
    max_results: u32,
    base_url: Url,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    topic: &'static str,
    search_depth: &'static str,
    chunks_per_source: u32,
    max_results: u32,
    include_answer: bool,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub raw_content: Option<String>,
}

/// Search results condensed for use in a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDigest {
    pub query: String,
    pub answer: Option<String>,
    pub hits: Vec<SearchHit>,
}

impl SearchDigest {
    /// Renders the digest as plain text: the synthesized answer, then one
    /// numbered block per hit with its snippet and a bounded page excerpt.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(answer) = self.answer.as_deref().filter(|a| !a.trim().is_empty()) {
            let _ = writeln!(out, "Search summary: {}", answer.trim());
        }
        if self.hits.is_empty() {
            out.push_str("No search results were found.\n");
        }
        for (i, hit) in self.hits.iter().enumerate() {
            let _ = writeln!(out, "[{}] {} ({})", i + 1, hit.title.trim(), hit.url);
            if !hit.content.trim().is_empty() {
                let _ = writeln!(out, "{}", hit.content.trim());
            }
            if let Some(raw) = hit.raw_content.as_deref().filter(|r| !r.trim().is_empty()) {
                let excerpt: String = raw.trim().chars().take(MAX_RAW_CONTENT_CHARS).collect();
                let _ = writeln!(out, "Page excerpt: {excerpt}");
            }
        }
        out
    }
}

impl TavilyClient {
    /// Creates a client pointed at the public Tavily API.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, max_results: u32, timeout_secs: u64) -> Result<Self, AgentError> {
        Self::with_base_url(api_key, max_results, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`AgentError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        max_results: u32,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("trustgrade/0.1 (product-analysis)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            max_results,
            base_url: normalise_base_url(base_url)?,
        })
    }

    /// Runs an advanced general-topic search.
    ///
    /// # Errors
    ///
    /// - [`AgentError::Http`] on network failure or timeout.
    /// - [`AgentError::Api`] on a non-2xx status.
    /// - [`AgentError::Deserialize`] if the body is not the expected shape.
    pub async fn search(&self, query: &str) -> Result<SearchDigest, AgentError> {
        let url = self
            .base_url
            .join("search")
            .map_err(|e| AgentError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let request = SearchRequest {
            query,
            topic: "general",
            search_depth: "advanced",
            chunks_per_source: CHUNKS_PER_SOURCE,
            max_results: self.max_results,
            include_answer: true,
            include_raw_content: true,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AgentError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message: error_excerpt(&body),
            });
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| AgentError::Deserialize {
                context: format!("search(query={query})"),
                source: e,
            })?;

        tracing::debug!(query, hits = parsed.results.len(), "Tavily search complete");

        Ok(SearchDigest {
            query: query.to_owned(),
            answer: parsed.answer,
            hits: parsed.results,
        })
    }
}
