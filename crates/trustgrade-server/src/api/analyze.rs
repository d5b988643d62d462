//! `POST /api/v1/analyze-product`.

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use trustgrade_analysis::AnalysisReport;
use trustgrade_core::ProductQuery;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const MAX_PRODUCT_NAME_CHARS: usize = 300;

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeProductRequest {
    pub product_url: String,
    pub product_name: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub dry_run: bool,
}

fn validate_product_url(req_id: &str, value: &str) -> Result<(), ApiError> {
    let url = reqwest::Url::parse(value.trim()).map_err(|_| {
        ApiError::new(
            req_id,
            "validation_error",
            format!("product_url must be a valid URL, got '{value}'"),
        )
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ApiError::new(
            req_id,
            "validation_error",
            format!("product_url must use http or https, got '{other}'"),
        )),
    }
}

fn validate_product_name(req_id: &str, value: &str) -> Result<(), ApiError> {
    let chars = value.trim().chars().count();
    if chars == 0 || chars > MAX_PRODUCT_NAME_CHARS {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("product_name must be 1-{MAX_PRODUCT_NAME_CHARS} characters"),
        ));
    }
    Ok(())
}

/// Runs one analysis. The report body is returned as-is, without the
/// `data`/`meta` envelope.
///
/// Task failures are reported inside the body with `status: "error"`; only
/// a crash of the analysis itself produces a 500.
pub(super) async fn analyze_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AnalyzeProductRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let rid = &req_id.0;
    validate_product_url(rid, &body.product_url)?;
    validate_product_name(rid, &body.product_name)?;

    let query = ProductQuery::new(body.product_url.trim(), body.product_name, body.brand_name);
    let dry_run = body.dry_run;
    let orchestrator = state.orchestrator.clone();

    let handle =
        tokio::spawn(async move { orchestrator.analyze_product(&query, dry_run).await });

    match handle.await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            tracing::error!(request_id = %rid, error = %e, "analysis task aborted");
            Err(
                ApiError::new(rid, "internal_error", "Analysis failed")
                    .with_details(serde_json::json!({ "message": e.to_string() })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use trustgrade_analysis::{AnalysisTask, Orchestrator, RecordKind, TaskError};

    use super::super::build_app;
    use super::*;

    struct PanickingTask(RecordKind);

    #[async_trait]
    impl AnalysisTask for PanickingTask {
        fn kind(&self) -> RecordKind {
            self.0
        }

        async fn run(&self, _query: &ProductQuery) -> Result<String, TaskError> {
            panic!("collaborator exploded");
        }
    }

    fn state(orchestrator: Orchestrator) -> AppState {
        AppState {
            orchestrator,
            live_configured: false,
        }
    }

    async fn post(state: AppState, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = build_app(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analyze-product")
                    .header("content-type", "application/json")
                    .header("x-request-id", "req-analyze")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn unavailable() -> AppState {
        state(Orchestrator::unavailable("GOOGLE_API_KEY is not set"))
    }

    #[tokio::test]
    async fn dry_run_returns_bare_report() {
        let (status, json) = post(
            unavailable(),
            serde_json::json!({
                "product_url": "https://www.amazon.com/dp/B000TEST",
                "product_name": "Widget",
                "brand_name": "Acme",
                "dry_run": true
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "completed");
        assert_eq!(json["final_grade"], "A");
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["brand_name"], "Acme");
        assert!(json.get("error_message").is_none());
        assert!(json.get("data").is_none(), "report must not be enveloped");
        assert_eq!(json["review_analysis"]["total_reviews_analyzed"], 150);
        assert_eq!(json["company_analysis"]["company_name"], "Example Corp");
    }

    #[tokio::test]
    async fn live_run_without_keys_reports_error_status() {
        let (status, json) = post(
            unavailable(),
            serde_json::json!({
                "product_url": "https://www.amazon.com/dp/B000TEST",
                "product_name": "Widget"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "error");
        assert_eq!(json["final_grade"], "N/A");
        assert_eq!(json["review_analysis"]["error"], "No review analysis result");
        assert_eq!(json["company_analysis"]["error"], "No company analysis result");
        assert!(json["error_message"]
            .as_str()
            .is_some_and(|m| m.contains("not configured")));
    }

    #[tokio::test]
    async fn non_http_url_is_rejected() {
        let (status, json) = post(
            unavailable(),
            serde_json::json!({
                "product_url": "ftp://example.com/widget",
                "product_name": "Widget"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["meta"]["request_id"], "req-analyze");
    }

    #[tokio::test]
    async fn unparseable_url_is_rejected() {
        let (status, json) = post(
            unavailable(),
            serde_json::json!({ "product_url": "not a url", "product_name": "Widget" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn blank_or_oversized_name_is_rejected() {
        for name in ["   ".to_string(), "x".repeat(MAX_PRODUCT_NAME_CHARS + 1)] {
            let (status, json) = post(
                unavailable(),
                serde_json::json!({
                    "product_url": "https://example.com/widget",
                    "product_name": name
                }),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"]["code"], "validation_error");
        }
    }

    #[tokio::test]
    async fn blank_brand_is_treated_as_absent() {
        let (status, json) = post(
            unavailable(),
            serde_json::json!({
                "product_url": "https://example.com/widget",
                "product_name": "Widget",
                "brand_name": "  ",
                "dry_run": true
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["brand_name"].is_null());
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_by_extractor() {
        let response = build_app(unavailable())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analyze-product")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn crashed_analysis_returns_internal_error() {
        let orchestrator = Orchestrator::new(
            Arc::new(PanickingTask(RecordKind::Review)),
            Arc::new(PanickingTask(RecordKind::Company)),
        );
        let (status, json) = post(
            state(orchestrator),
            serde_json::json!({
                "product_url": "https://example.com/widget",
                "product_name": "Widget"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "internal_error");
        assert_eq!(json["error"]["message"], "Analysis failed");
        assert!(json["error"]["details"]["message"].is_string());
    }
}
