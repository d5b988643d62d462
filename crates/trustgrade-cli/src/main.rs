mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "trustgrade-cli")]
#[command(about = "Grade how trustworthy a product and its maker are")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze one product and print the report as JSON
    Analyze {
        /// Product page URL (http or https)
        #[arg(long, value_parser = parse_http_url)]
        url: String,
        /// Product name
        #[arg(long)]
        name: String,
        /// Brand name, if known
        #[arg(long)]
        brand: Option<String>,
        /// Use canned records instead of calling Gemini and Tavily
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the letter grade for a review score and a company score
    Grade {
        review_score: String,
        company_score: String,
    },
    /// Pull the JSON object out of raw model output and classify it
    Extract {
        /// File holding the raw output; reads stdin when omitted
        file: Option<PathBuf>,
    },
}

fn parse_http_url(value: &str) -> Result<String, String> {
    let url = reqwest::Url::parse(value).map_err(|e| format!("invalid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(value.to_string()),
        other => Err(format!("URL scheme must be http or https, got '{other}'")),
    }
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    // stdout carries the command's JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            url,
            name,
            brand,
            dry_run,
        } => {
            let config = trustgrade_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            commands::run_analyze(&config, &url, &name, brand, dry_run).await
        }
        Commands::Grade {
            review_score,
            company_score,
        } => {
            init_tracing("warn")?;
            commands::run_grade(&review_score, &company_score);
            Ok(())
        }
        Commands::Extract { file } => {
            init_tracing("warn")?;
            commands::run_extract(file.as_deref())
        }
    }
}

#[cfg(test)]
mod tests;
