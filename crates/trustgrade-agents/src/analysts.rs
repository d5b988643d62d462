//! Live implementations of the analysis tasks.

use std::sync::Arc;

use async_trait::async_trait;
use trustgrade_analysis::{AnalysisTask, Orchestrator, RecordKind, TaskError};
use trustgrade_core::{AppConfig, ProductQuery};

use crate::error::AgentError;
use crate::gemini::{GeminiClient, GenerationSettings};
use crate::prompts;
use crate::tavily::TavilyClient;

/// Searches for customer reviews and asks the model for a review record.
pub struct ReviewAnalyst {
    search: Arc<TavilyClient>,
    llm: Arc<GeminiClient>,
}

impl ReviewAnalyst {
    #[must_use]
    pub fn new(search: Arc<TavilyClient>, llm: Arc<GeminiClient>) -> Self {
        Self { search, llm }
    }
}

#[async_trait]
impl AnalysisTask for ReviewAnalyst {
    fn kind(&self) -> RecordKind {
        RecordKind::Review
    }

    async fn run(&self, query: &ProductQuery) -> Result<String, TaskError> {
        let search_query = prompts::review_search_query(query);
        tracing::info!(product = %query.product_name, search = %search_query, "running review analysis");
        let digest = self.search.search(&search_query).await?;
        let prompt = prompts::review_prompt(query, &digest.render());
        Ok(self.llm.generate(&prompt).await?)
    }
}

/// Searches for manufacturer background and asks the model for a company
/// record.
pub struct CompanyAnalyst {
    search: Arc<TavilyClient>,
    llm: Arc<GeminiClient>,
}

impl CompanyAnalyst {
    #[must_use]
    pub fn new(search: Arc<TavilyClient>, llm: Arc<GeminiClient>) -> Self {
        Self { search, llm }
    }
}

#[async_trait]
impl AnalysisTask for CompanyAnalyst {
    fn kind(&self) -> RecordKind {
        RecordKind::Company
    }

    async fn run(&self, query: &ProductQuery) -> Result<String, TaskError> {
        let search_query = prompts::company_search_query(query);
        tracing::info!(product = %query.product_name, search = %search_query, "running company analysis");
        let digest = self.search.search(&search_query).await?;
        let prompt = prompts::company_prompt(query, &digest.render());
        Ok(self.llm.generate(&prompt).await?)
    }
}

/// Builds an orchestrator backed by live Gemini and Tavily clients.
///
/// Both analysts share one client of each kind.
///
/// # Errors
///
/// - [`AgentError::Config`] if either API key is missing.
/// - [`AgentError::InvalidBaseUrl`] if a configured base URL does not parse.
/// - [`AgentError::Http`] if an HTTP client cannot be built.
pub fn build_orchestrator(config: &AppConfig) -> Result<Orchestrator, AgentError> {
    let credentials = config.live_credentials()?;
    let settings = GenerationSettings {
        temperature: config.llm_temperature,
        max_output_tokens: config.llm_max_output_tokens,
    };

    let llm = Arc::new(GeminiClient::with_base_url(
        &credentials.google_api_key,
        &config.llm_model,
        settings,
        config.request_timeout_secs,
        &config.llm_base_url,
    )?);
    let search = Arc::new(TavilyClient::with_base_url(
        &credentials.tavily_api_key,
        config.search_max_results,
        config.request_timeout_secs,
        &config.search_base_url,
    )?);

    tracing::info!(model = %config.llm_model, "live analysis configured");

    Ok(Orchestrator::new(
        Arc::new(ReviewAnalyst::new(Arc::clone(&search), Arc::clone(&llm))),
        Arc::new(CompanyAnalyst::new(search, llm)),
    ))
}
