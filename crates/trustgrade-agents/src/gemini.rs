//! HTTP client for the Gemini `generateContent` REST endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::{error_excerpt, normalise_base_url};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const SERVICE: &str = "gemini";
const TOP_P: f32 = 0.8;
const TOP_K: u32 = 40;

/// Sampling settings sent with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 2048,
        }
    }
}

/// Client for one Gemini model.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    settings: GenerationSettings,
    base_url: Url,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Creates a client pointed at the public Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        settings: GenerationSettings,
        timeout_secs: u64,
    ) -> Result<Self, AgentError> {
        Self::with_base_url(api_key, model, settings, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`AgentError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        settings: GenerationSettings,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("trustgrade/0.1 (product-analysis)")
            .build()?;

        let base_url = normalise_base_url(base_url)?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            settings,
            base_url,
        })
    }

    /// Sends `prompt` as a single user turn and returns the reply text.
    ///
    /// Text from every part of the first candidate is concatenated.
    ///
    /// # Errors
    ///
    /// - [`AgentError::Http`] on network failure or timeout.
    /// - [`AgentError::Api`] on a non-2xx status.
    /// - [`AgentError::Deserialize`] if the body is not the expected shape.
    /// - [`AgentError::EmptyResponse`] if the candidate carries no text
    ///   (for example when generation was blocked).
    pub async fn generate(&self, prompt: &str) -> Result<String, AgentError> {
        let url = self.endpoint()?;
        let request = GenerateRequest {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                top_p: TOP_P,
                top_k: TOP_K,
                max_output_tokens: self.settings.max_output_tokens,
            },
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "calling Gemini");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
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

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| AgentError::Deserialize {
                context: format!("generateContent(model={})", self.model),
                source: e,
            })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AgentError::EmptyResponse { service: SERVICE });
        }
        Ok(text)
    }

    fn endpoint(&self) -> Result<Url, AgentError> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        self.base_url
            .join(&path)
            .map_err(|e| AgentError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::with_base_url(
            "test-key",
            "gemini-1.5-pro",
            GenerationSettings::default(),
            30,
            base_url,
        )
        .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_appends_model_path() {
        let client = test_client("https://generativelanguage.googleapis.com");
        assert_eq!(
            client.endpoint().unwrap().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = test_client("http://localhost:9000/proxy/");
        assert_eq!(
            client.endpoint().unwrap().as_str(),
            "http://localhost:9000/proxy/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = GeminiClient::with_base_url(
            "k",
            "m",
            GenerationSettings::default(),
            5,
            "not a url",
        );
        assert!(matches!(result, Err(AgentError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn request_body_uses_camel_case_generation_config() {
        let request = GenerateRequest {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                top_p: TOP_P,
                top_k: TOP_K,
                max_output_tokens: 100,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 100);
        assert_eq!(value["generationConfig"]["topK"], 40);
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
    }
}
