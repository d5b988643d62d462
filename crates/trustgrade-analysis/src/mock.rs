//! Canned records for dry runs. No collaborator is called.

use trustgrade_core::{CompanyRecord, ReviewRecord, Sentiment};

const MOCK_COMPANY_NAME: &str = "Example Corp";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Fixed review analysis for `product_name`. Reliability score is 8.5.
#[must_use]
pub fn mock_review_record(product_name: &str, brand_name: Option<&str>) -> ReviewRecord {
    tracing::info!(product = product_name, "generating mock review analysis");
    ReviewRecord {
        average_customer_rating: 8.5,
        total_reviews_analyzed: 150,
        customer_sentiment_summary: Sentiment::Positive,
        key_positive_points: strings(&[
            "Excellent build quality",
            "Great value for money",
            "Easy to use",
            "Reliable performance",
            "Good customer support",
        ]),
        key_negative_points: strings(&[
            "Some minor quality control issues",
            "Documentation could be better",
            "Slightly expensive",
        ]),
        common_issues: strings(&[
            "Occasional software glitches",
            "Some users report shipping delays",
            "Minor assembly issues",
        ]),
        overall_product_reliability_score: 8.5,
        brand_name: brand_name.map(ToString::to_string),
        final_summary: format!(
            "Customers rate {product_name} highly for build quality and value, \
             with only minor quality-control complaints."
        ),
    }
}

/// Fixed company analysis for the maker of `product_name`. Reliability score is 8.0.
#[must_use]
pub fn mock_company_record(product_name: &str, brand_name: Option<&str>) -> CompanyRecord {
    tracing::info!(product = product_name, "generating mock company analysis");
    CompanyRecord {
        company_name: MOCK_COMPANY_NAME.to_string(),
        years_in_market: "15+ years".to_string(),
        safety_issues: "No major safety concerns reported".to_string(),
        legal_issues: "Minor patent disputes resolved in 2022".to_string(),
        company_reliability_score: 8.0,
        market_position: "Leading manufacturer in the mid-range segment".to_string(),
        brand_name: brand_name.map(ToString::to_string),
        final_summary: format!(
            "The maker of {product_name} is an established mid-range manufacturer \
             with a clean safety record and only minor resolved legal disputes."
        ),
    }
}
