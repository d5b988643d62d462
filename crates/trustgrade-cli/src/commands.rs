//! Command handlers called from `main` once logging is set up.

use std::io::Read as _;
use std::path::Path;

use anyhow::Context as _;
use serde_json::Value;
use trustgrade_analysis::{classify, compute_grade, extract_json_object, Grade, Orchestrator};
use trustgrade_core::{parse_score, AppConfig, ProductQuery};

pub(crate) async fn run_analyze(
    config: &AppConfig,
    url: &str,
    name: &str,
    brand: Option<String>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let orchestrator = match trustgrade_agents::build_orchestrator(config) {
        Ok(orchestrator) => orchestrator,
        Err(e) if dry_run => {
            tracing::debug!(error = %e, "live collaborators not configured; dry run only");
            Orchestrator::unavailable(&e.to_string())
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context("live analysis is not configured (pass --dry-run to use mock data)"));
        }
    };

    let query = ProductQuery::new(url, name, brand);
    anyhow::ensure!(!query.product_name.is_empty(), "product name must not be blank");

    let report = orchestrator.analyze_product(&query, dry_run).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Scores that are not numbers count as missing, which grades `N/A`.
pub(crate) fn grade_for(review_score: &str, company_score: &str) -> Grade {
    let parse = |raw: &str| parse_score(&Value::String(raw.to_string()));
    compute_grade(parse(review_score), parse(company_score))
}

pub(crate) fn run_grade(review_score: &str, company_score: &str) {
    println!("{}", grade_for(review_score, company_score));
}

/// Renders the extracted object followed by its record kind.
pub(crate) fn describe_extraction(raw: &str) -> anyhow::Result<String> {
    let object = extract_json_object(raw)?;
    let kind = classify(&object);
    let pretty = serde_json::to_string_pretty(&Value::Object(object))?;
    Ok(format!("{pretty}\nkind: {kind}"))
}

pub(crate) fn run_extract(file: Option<&Path>) -> anyhow::Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    println!("{}", describe_extraction(&raw)?);
    Ok(())
}
