use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trustgrade_core::{CompanyRecord, ReviewRecord};
use uuid::Uuid;

use crate::classify::RecordKind;
use crate::grade::Grade;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Completed,
    Error,
}

/// Stands in for a record whose task failed or produced unusable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub error: String,
}

impl Placeholder {
    #[must_use]
    pub fn missing(kind: RecordKind) -> Self {
        Self {
            error: format!("No {kind} analysis result"),
        }
    }
}

/// One analysis slot of the report: the decoded record or its placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slot<T> {
    Ready(T),
    Missing(Placeholder),
}

impl<T> Slot<T> {
    #[must_use]
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Slot::Ready(record) => Some(record),
            Slot::Missing(_) => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Slot::Ready(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub status: AnalysisStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub review_analysis: Slot<ReviewRecord>,
    pub company_analysis: Slot<CompanyRecord>,
    pub final_grade: Grade,
    pub timestamp: DateTime<Utc>,
    pub dry_run: bool,
    pub brand_name: Option<String>,
    pub final_summary: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_slot_serializes_as_error_object() {
        let slot: Slot<ReviewRecord> = Slot::Missing(Placeholder::missing(RecordKind::Review));
        assert_eq!(
            serde_json::to_value(&slot).unwrap(),
            json!({"error": "No review analysis result"})
        );
    }

    #[test]
    fn error_object_deserializes_as_missing_slot() {
        let slot: Slot<CompanyRecord> =
            serde_json::from_value(json!({"error": "No company analysis result"})).unwrap();
        assert!(!slot.is_ready());
        assert!(slot.as_ready().is_none());
    }
}
