//! Seam between the orchestrator and whatever produces raw task output.

use async_trait::async_trait;
use trustgrade_core::ProductQuery;

use crate::classify::RecordKind;
use crate::error::TaskError;

/// One analysis task: given a product, return raw text that should contain
/// a single JSON object of the task's record kind.
///
/// Implementations own their timeouts. The orchestrator awaits each call
/// once and never retries.
#[async_trait]
pub trait AnalysisTask: Send + Sync {
    /// Record kind this task is expected to produce.
    fn kind(&self) -> RecordKind;

    /// Runs the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError`] when the collaborator cannot produce output.
    async fn run(&self, query: &ProductQuery) -> Result<String, TaskError>;
}

/// Stand-in used when live collaborators are not configured. Every run
/// fails with [`TaskError::NotConfigured`].
#[derive(Debug, Clone)]
pub struct UnavailableTask {
    kind: RecordKind,
    reason: String,
}

impl UnavailableTask {
    #[must_use]
    pub fn new(kind: RecordKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl AnalysisTask for UnavailableTask {
    fn kind(&self) -> RecordKind {
        self.kind
    }

    async fn run(&self, _query: &ProductQuery) -> Result<String, TaskError> {
        Err(TaskError::NotConfigured(self.reason.clone()))
    }
}
