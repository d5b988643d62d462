use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank keys in a `.env` template count as unset.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let bind_addr = or_default("TRUSTGRADE_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("TRUSTGRADE_BIND_ADDR", e.to_string()))?;

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("TRUSTGRADE_ENV", "development"));
    let log_level = or_default("TRUSTGRADE_LOG_LEVEL", "info");

    let google_api_key = optional("GOOGLE_API_KEY");
    let tavily_api_key = optional("TAVILY_API_KEY");

    let llm_model = or_default("TRUSTGRADE_LLM_MODEL", "gemini-1.5-pro");
    let llm_base_url = or_default(
        "TRUSTGRADE_LLM_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let llm_temperature = parse_temperature(&or_default("TRUSTGRADE_LLM_TEMPERATURE", "0.7"))?;
    let llm_max_output_tokens = parse_u32("TRUSTGRADE_LLM_MAX_OUTPUT_TOKENS", "2048")?;

    let search_base_url = or_default("TRUSTGRADE_SEARCH_BASE_URL", "https://api.tavily.com");
    let search_max_results = parse_u32("TRUSTGRADE_SEARCH_MAX_RESULTS", "10")?;
    let request_timeout_secs = parse_u64("TRUSTGRADE_REQUEST_TIMEOUT_SECS", "60")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        google_api_key,
        tavily_api_key,
        llm_model,
        llm_base_url,
        llm_temperature,
        llm_max_output_tokens,
        search_base_url,
        search_max_results,
        request_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_temperature(raw: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "TRUSTGRADE_LLM_TEMPERATURE".to_string(),
        reason,
    };
    let value = raw.parse::<f32>().map_err(|e| invalid(e.to_string()))?;
    if !(0.0..=2.0).contains(&value) {
        return Err(invalid(format!("must be between 0.0 and 2.0, got {value}")));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
