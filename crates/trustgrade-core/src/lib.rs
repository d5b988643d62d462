//! Shared domain types and configuration for the trustgrade workspace.

pub mod app_config;
pub mod config;
pub mod product;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, LiveCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::ProductQuery;
pub use records::{parse_score, CompanyRecord, ReviewRecord, Sentiment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
