use trustgrade_analysis::{ExtractionError, Grade};

use super::*;

#[test]
fn parses_analyze_command() {
    let cli = Cli::try_parse_from([
        "trustgrade-cli",
        "analyze",
        "--url",
        "https://www.amazon.com/dp/B000TEST",
        "--name",
        "Widget",
        "--brand",
        "Acme",
        "--dry-run",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Analyze {
            url,
            name,
            brand,
            dry_run,
        } => {
            assert_eq!(url, "https://www.amazon.com/dp/B000TEST");
            assert_eq!(name, "Widget");
            assert_eq!(brand.as_deref(), Some("Acme"));
            assert!(dry_run);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn analyze_defaults_to_live_run_without_brand() {
    let cli = Cli::try_parse_from([
        "trustgrade-cli",
        "analyze",
        "--url",
        "http://example.com/p",
        "--name",
        "Widget",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Analyze {
            brand: None,
            dry_run: false,
            ..
        }
    ));
}

#[test]
fn analyze_rejects_non_http_url() {
    let result = Cli::try_parse_from([
        "trustgrade-cli",
        "analyze",
        "--url",
        "ftp://example.com/p",
        "--name",
        "Widget",
    ]);
    assert!(result.is_err());
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["trustgrade-cli"]).is_err());
}

#[test]
fn parses_extract_without_file() {
    let cli = Cli::try_parse_from(["trustgrade-cli", "extract"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Extract { file: None }));
}

#[test]
fn grade_uses_mean_of_scores() {
    assert_eq!(commands::grade_for("9", "9.4"), Grade::APlus);
    assert_eq!(commands::grade_for("7", "6"), Grade::B);
    assert_eq!(commands::grade_for("5", "5.5"), Grade::C);
    assert_eq!(commands::grade_for("4", "4.9"), Grade::D);
}

#[test]
fn grade_with_non_numeric_score_is_not_available() {
    assert_eq!(commands::grade_for("great", "8"), Grade::NotAvailable);
    assert_eq!(commands::grade_for("8", ""), Grade::NotAvailable);
}

#[test]
fn extraction_reports_kind() {
    let out = commands::describe_extraction(
        "Result:\n```json\n{\"company_name\": \"Acme\", \"company_reliability_score\": 8}\n```",
    )
    .expect("should extract");
    assert!(out.contains("\"company_name\": \"Acme\""));
    assert!(out.ends_with("kind: company"));
}

#[test]
fn extraction_of_unrecognised_object_is_unknown() {
    let out = commands::describe_extraction("{\"foo\": 1}").expect("should extract");
    assert!(out.ends_with("kind: unknown"));
}

#[test]
fn extraction_failure_surfaces_error() {
    let err = commands::describe_extraction("no json here").expect_err("should fail");
    assert_eq!(
        err.downcast_ref::<ExtractionError>(),
        Some(&ExtractionError::NoJsonFound)
    );
}
