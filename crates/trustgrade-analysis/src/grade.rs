//! Letter grade from the review and company reliability scores.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "N/A")]
    NotAvailable,
    D,
    C,
    B,
    #[serde(rename = "B+")]
    BPlus,
    A,
    #[serde(rename = "A+")]
    APlus,
}

/// Inclusive lower bounds on the average score, highest first.
const THRESHOLDS: &[(f64, Grade)] = &[
    (9.0, Grade::APlus),
    (8.0, Grade::A),
    (7.0, Grade::BPlus),
    (6.0, Grade::B),
    (5.0, Grade::C),
];

impl Grade {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::NotAvailable => "N/A",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grades the mean of the two scores.
///
/// Returns [`Grade::NotAvailable`] unless both scores are present and
/// finite. No rounding is applied before comparing against the thresholds.
#[must_use]
pub fn compute_grade(review_score: Option<f64>, company_score: Option<f64>) -> Grade {
    match (review_score, company_score) {
        (Some(review), Some(company)) if review.is_finite() && company.is_finite() => {
            grade_for_average(f64::midpoint(review, company))
        }
        _ => Grade::NotAvailable,
    }
}

fn grade_for_average(average: f64) -> Grade {
    THRESHOLDS
        .iter()
        .find(|(bound, _)| average >= *bound)
        .map_or(Grade::D, |&(_, grade)| grade)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use trustgrade_core::parse_score;

    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(compute_grade(Some(9.0), Some(9.0)), Grade::APlus);
        assert_eq!(compute_grade(Some(8.0), Some(8.0)), Grade::A);
        assert_eq!(compute_grade(Some(7.0), Some(7.0)), Grade::BPlus);
        assert_eq!(compute_grade(Some(6.0), Some(6.0)), Grade::B);
        assert_eq!(compute_grade(Some(5.0), Some(5.0)), Grade::C);
        assert_eq!(compute_grade(Some(4.99), Some(5.0)), Grade::D);
    }

    #[test]
    fn no_rounding_before_comparison() {
        assert_eq!(compute_grade(Some(8.9), Some(8.9)), Grade::A);
        assert_eq!(compute_grade(Some(8.5), Some(7.5)), Grade::A);
        assert_eq!(compute_grade(Some(8.5), Some(8.0)), Grade::A);
    }

    #[test]
    fn zero_scores_grade_d() {
        assert_eq!(compute_grade(Some(0.0), Some(0.0)), Grade::D);
    }

    #[test]
    fn missing_score_is_not_available() {
        assert_eq!(compute_grade(None, Some(8.0)), Grade::NotAvailable);
        assert_eq!(compute_grade(Some(8.0), None), Grade::NotAvailable);
        assert_eq!(compute_grade(None, None), Grade::NotAvailable);
    }

    #[test]
    fn non_numeric_score_is_not_available() {
        let bad = parse_score(&json!("bad"));
        assert_eq!(compute_grade(bad, Some(8.0)), Grade::NotAvailable);
    }

    #[test]
    fn non_finite_score_is_not_available() {
        assert_eq!(compute_grade(Some(f64::NAN), Some(8.0)), Grade::NotAvailable);
        assert_eq!(
            compute_grade(Some(f64::INFINITY), Some(8.0)),
            Grade::NotAvailable
        );
    }

    #[test]
    fn raising_a_score_never_lowers_the_grade() {
        let steps: Vec<f64> = (0..=40).map(|i| f64::from(i) * 0.25).collect();
        for &company in &steps {
            let mut previous = Grade::NotAvailable;
            for &review in &steps {
                let grade = compute_grade(Some(review), Some(company));
                assert!(
                    grade >= previous,
                    "grade fell from {previous} to {grade} at review={review}, company={company}"
                );
                previous = grade;
            }
        }
    }

    #[test]
    fn serializes_with_display_labels() {
        assert_eq!(serde_json::to_value(Grade::APlus).unwrap(), json!("A+"));
        assert_eq!(serde_json::to_value(Grade::BPlus).unwrap(), json!("B+"));
        assert_eq!(
            serde_json::to_value(Grade::NotAvailable).unwrap(),
            json!("N/A")
        );
        assert_eq!(Grade::D.to_string(), "D");
    }
}
