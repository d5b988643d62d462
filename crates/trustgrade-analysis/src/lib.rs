//! Result reconciliation and scoring for product-trust analyses.
//!
//! Takes the raw text produced by the review and company tasks, pulls a JSON
//! object out of each, decides which record it is, grades the combined
//! reliability scores and composes a bounded summary. [`Orchestrator`] drives
//! the whole sequence and always returns a complete [`AnalysisReport`].

pub mod classify;
pub mod error;
pub mod extract;
pub mod grade;
pub mod mock;
pub mod pipeline;
pub mod report;
pub mod summary;
pub mod task;

pub use classify::{classify, decode_record, ObjectKind, RecordKind, TypedRecord};
pub use error::{ExtractionError, TaskError};
pub use extract::extract_json_object;
pub use grade::{compute_grade, Grade};
pub use mock::{mock_company_record, mock_review_record};
pub use pipeline::Orchestrator;
pub use report::{AnalysisReport, AnalysisStatus, Placeholder, Slot};
pub use summary::{compose_summary, FALLBACK_SUMMARY};
pub use task::{AnalysisTask, UnavailableTask};
