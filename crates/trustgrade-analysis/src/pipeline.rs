//! Analysis orchestration.

use std::sync::Arc;

use chrono::Utc;
use trustgrade_core::{CompanyRecord, ProductQuery, ReviewRecord};
use uuid::Uuid;

use crate::classify::{decode_record, RecordKind, TypedRecord};
use crate::error::TaskError;
use crate::extract::extract_json_object;
use crate::grade::compute_grade;
use crate::mock::{mock_company_record, mock_review_record};
use crate::report::{AnalysisReport, AnalysisStatus, Placeholder, Slot};
use crate::summary::compose_summary;
use crate::task::{AnalysisTask, UnavailableTask};

/// Runs the review and company tasks and reconciles their output into one
/// [`AnalysisReport`].
///
/// Holds no per-request state, so one instance can serve concurrent
/// requests.
#[derive(Clone)]
pub struct Orchestrator {
    review_task: Arc<dyn AnalysisTask>,
    company_task: Arc<dyn AnalysisTask>,
}

/// Records gathered during one live run.
#[derive(Default)]
struct Slots {
    review: Option<ReviewRecord>,
    company: Option<CompanyRecord>,
}

impl Orchestrator {
    #[must_use]
    pub fn new(review_task: Arc<dyn AnalysisTask>, company_task: Arc<dyn AnalysisTask>) -> Self {
        Self {
            review_task,
            company_task,
        }
    }

    /// Orchestrator whose live runs always fail with `reason`. Dry runs
    /// still work.
    #[must_use]
    pub fn unavailable(reason: &str) -> Self {
        Self::new(
            Arc::new(UnavailableTask::new(RecordKind::Review, reason)),
            Arc::new(UnavailableTask::new(RecordKind::Company, reason)),
        )
    }

    /// Analyses one product.
    ///
    /// 1. Dry runs skip both tasks and use the mock records.
    /// 2. Otherwise the review task runs, then the company task.
    /// 3. Each output is extracted, classified and decoded into its slot.
    /// 4. The grade and summary are computed from whatever slots filled.
    ///
    /// Never fails: a task error marks the report `error` and leaves that
    /// slot at its placeholder. Unusable output only leaves the placeholder.
    pub async fn analyze_product(&self, query: &ProductQuery, dry_run: bool) -> AnalysisReport {
        let analysis_id = Uuid::new_v4();
        tracing::info!(
            %analysis_id,
            product = %query.product_name,
            brand = ?query.brand_name,
            dry_run,
            "starting product analysis"
        );

        if dry_run {
            let slots = Slots {
                review: Some(mock_review_record(
                    &query.product_name,
                    query.brand_name.as_deref(),
                )),
                company: Some(mock_company_record(
                    &query.product_name,
                    query.brand_name.as_deref(),
                )),
            };
            return assemble(analysis_id, query, slots, Vec::new(), true);
        }

        let mut slots = Slots::default();
        let mut failures = Vec::new();

        for task in [&self.review_task, &self.company_task] {
            let kind = task.kind();
            match run_task(task.as_ref(), query).await {
                Ok(raw) => slots.absorb(analysis_id, kind, &raw),
                Err(e) => {
                    tracing::warn!(%analysis_id, task = %kind, error = %e, "analysis task failed");
                    failures.push(format!("{kind} analysis failed: {e}"));
                }
            }
        }

        assemble(analysis_id, query, slots, failures, false)
    }
}

async fn run_task(task: &dyn AnalysisTask, query: &ProductQuery) -> Result<String, TaskError> {
    let raw = task.run(query).await?;
    if raw.trim().is_empty() {
        return Err(TaskError::EmptyOutput);
    }
    Ok(raw)
}

impl Slots {
    /// Extracts and decodes one task's output into the slot its content
    /// classifies as. The first record of each kind wins.
    fn absorb(&mut self, analysis_id: Uuid, task_kind: RecordKind, raw: &str) {
        let object = match extract_json_object(raw) {
            Ok(object) => object,
            Err(e) => {
                tracing::warn!(%analysis_id, task = %task_kind, error = %e, "could not extract task output");
                return;
            }
        };

        let Some(record) = decode_record(object) else {
            return;
        };

        if record.kind() != task_kind {
            tracing::warn!(
                %analysis_id,
                task = %task_kind,
                produced = %record.kind(),
                "task produced a record of the other kind"
            );
        }

        match record {
            TypedRecord::Review(review) if self.review.is_none() => self.review = Some(review),
            TypedRecord::Company(company) if self.company.is_none() => {
                self.company = Some(company);
            }
            other => {
                tracing::warn!(%analysis_id, kind = %other.kind(), "slot already filled, ignoring duplicate record");
            }
        }
    }
}

fn assemble(
    analysis_id: Uuid,
    query: &ProductQuery,
    slots: Slots,
    failures: Vec<String>,
    dry_run: bool,
) -> AnalysisReport {
    let Slots {
        mut review,
        mut company,
    } = slots;

    if let Some(brand) = &query.brand_name {
        if let Some(review) = review.as_mut().filter(|r| r.brand_name.is_none()) {
            review.brand_name = Some(brand.clone());
        }
        if let Some(company) = company.as_mut().filter(|c| c.brand_name.is_none()) {
            company.brand_name = Some(brand.clone());
        }
    }

    let final_grade = compute_grade(
        review.as_ref().map(|r| r.overall_product_reliability_score),
        company.as_ref().map(|c| c.company_reliability_score),
    );
    let final_summary = compose_summary(
        review.as_ref().map(|r| r.final_summary.as_str()),
        company.as_ref().map(|c| c.final_summary.as_str()),
    );
    let brand_name = query
        .brand_name
        .clone()
        .or_else(|| review.as_ref().and_then(|r| r.brand_name.clone()))
        .or_else(|| company.as_ref().and_then(|c| c.brand_name.clone()));

    let (status, error_message) = if failures.is_empty() {
        (AnalysisStatus::Completed, None)
    } else {
        (AnalysisStatus::Error, Some(failures.join("; ")))
    };

    tracing::info!(
        %analysis_id,
        status = ?status,
        grade = %final_grade,
        review_ready = review.is_some(),
        company_ready = company.is_some(),
        "product analysis finished"
    );

    AnalysisReport {
        analysis_id,
        status,
        error_message,
        review_analysis: review.map_or_else(
            || Slot::Missing(Placeholder::missing(RecordKind::Review)),
            Slot::Ready,
        ),
        company_analysis: company.map_or_else(
            || Slot::Missing(Placeholder::missing(RecordKind::Company)),
            Slot::Ready,
        ),
        final_grade,
        timestamp: Utc::now(),
        dry_run,
        brand_name,
        final_summary,
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
