//! Decides whether an extracted object is a review or a company record.

use serde_json::{Map, Value};
use trustgrade_core::{CompanyRecord, ReviewRecord};

/// Key only a review record carries. Checked first.
const REVIEW_DISCRIMINANT: &str = "average_customer_rating";
/// Key only a company record carries.
const COMPANY_DISCRIMINANT: &str = "company_name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Review,
    Company,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Review => write!(f, "review"),
            RecordKind::Company => write!(f, "company"),
        }
    }
}

/// What [`classify`] makes of an extracted object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Review,
    Company,
    Unknown,
}

impl ObjectKind {
    /// The record kind to decode against, if any.
    #[must_use]
    pub fn record_kind(self) -> Option<RecordKind> {
        match self {
            ObjectKind::Review => Some(RecordKind::Review),
            ObjectKind::Company => Some(RecordKind::Company),
            ObjectKind::Unknown => None,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.record_kind() {
            Some(kind) => write!(f, "{kind}"),
            None => write!(f, "unknown"),
        }
    }
}

/// A record that passed classification and strict decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedRecord {
    Review(ReviewRecord),
    Company(CompanyRecord),
}

impl TypedRecord {
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            TypedRecord::Review(_) => RecordKind::Review,
            TypedRecord::Company(_) => RecordKind::Company,
        }
    }
}

/// Classifies an object by discriminant key.
///
/// An object carrying both discriminants is a review.
#[must_use]
pub fn classify(object: &Map<String, Value>) -> ObjectKind {
    if object.contains_key(REVIEW_DISCRIMINANT) {
        ObjectKind::Review
    } else if object.contains_key(COMPANY_DISCRIMINANT) {
        ObjectKind::Company
    } else {
        ObjectKind::Unknown
    }
}

/// Decodes `object` against each schema whose discriminant it carries,
/// review first. The first strict decode that succeeds wins.
///
/// Returns `None` for unknown objects and for objects that fail every
/// matching decode (missing required fields, non-numeric scores). Both
/// cases are logged, never raised.
#[must_use]
pub fn decode_record(object: Map<String, Value>) -> Option<TypedRecord> {
    let candidates: Vec<RecordKind> = [
        (REVIEW_DISCRIMINANT, RecordKind::Review),
        (COMPANY_DISCRIMINANT, RecordKind::Company),
    ]
    .into_iter()
    .filter(|(key, _)| object.contains_key(*key))
    .map(|(_, kind)| kind)
    .collect();

    if candidates.is_empty() {
        tracing::warn!(
            keys = ?object.keys().collect::<Vec<_>>(),
            "task output matched neither record kind"
        );
        return None;
    }

    let value = Value::Object(object);
    for kind in candidates {
        let decoded = match kind {
            RecordKind::Review => serde_json::from_value(value.clone()).map(TypedRecord::Review),
            RecordKind::Company => serde_json::from_value(value.clone()).map(TypedRecord::Company),
        };
        match decoded {
            Ok(record) => return Some(record),
            Err(e) => tracing::warn!(kind = %kind, error = %e, "task output failed strict decode"),
        }
    }
    None
}
