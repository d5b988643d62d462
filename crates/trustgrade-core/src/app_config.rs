use std::net::SocketAddr;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub google_api_key: Option<String>,
    pub tavily_api_key: Option<String>,
    pub llm_model: String,
    pub llm_base_url: String,
    pub llm_temperature: f32,
    pub llm_max_output_tokens: u32,
    pub search_base_url: String,
    pub search_max_results: u32,
    pub request_timeout_secs: u64,
}

/// API keys needed by the live review and company collaborators.
#[derive(Clone)]
pub struct LiveCredentials {
    pub google_api_key: String,
    pub tavily_api_key: String,
}

impl AppConfig {
    /// Returns both outbound API keys, or the name of the first one missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming `GOOGLE_API_KEY` or
    /// `TAVILY_API_KEY` when either is unset.
    pub fn live_credentials(&self) -> Result<LiveCredentials, ConfigError> {
        let google_api_key = self
            .google_api_key
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_API_KEY".to_string()))?;
        let tavily_api_key = self
            .tavily_api_key
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("TAVILY_API_KEY".to_string()))?;
        Ok(LiveCredentials {
            google_api_key,
            tavily_api_key,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "tavily_api_key",
                &self.tavily_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("llm_model", &self.llm_model)
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_temperature", &self.llm_temperature)
            .field("llm_max_output_tokens", &self.llm_max_output_tokens)
            .field("search_base_url", &self.search_base_url)
            .field("search_max_results", &self.search_max_results)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for LiveCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveCredentials")
            .field("google_api_key", &"[redacted]")
            .field("tavily_api_key", &"[redacted]")
            .finish()
    }
}
