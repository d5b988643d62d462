//! Search queries and prompt templates for the two analysts.
//!
//! The output-format blocks list exactly the fields of `ReviewRecord` and
//! `CompanyRecord`; keep them in step with `trustgrade_core::records`.

use trustgrade_core::ProductQuery;

const REVIEW_OUTPUT_FORMAT: &str = r#"{
  "average_customer_rating": <number between 0 and 10>,
  "total_reviews_analyzed": <number of reviews analyzed>,
  "customer_sentiment_summary": <"positive", "negative", or "neutral">,
  "key_positive_points": ["<specific positive aspect from reviews>", "..."],
  "key_negative_points": ["<specific negative aspect from reviews>", "..."],
  "common_issues": ["<specific issue mentioned in reviews>", "..."],
  "overall_product_reliability_score": <number between 0 and 10>,
  "final_summary": "<one sentence, at most 50 words, on what customers say>"
}"#;

const COMPANY_OUTPUT_FORMAT: &str = r#"{
  "company_name": "<name of the company>",
  "years_in_market": "<how long the company has been in business>",
  "safety_issues": "<any reported safety concerns at company level>",
  "legal_issues": "<any legal challenges or lawsuits>",
  "company_reliability_score": <number between 0 and 10>,
  "market_position": "<company's position in the market>",
  "final_summary": "<one sentence, at most 50 words, on the company's trustworthiness>"
}"#;

#[must_use]
pub fn review_search_query(query: &ProductQuery) -> String {
    format!("Amazon reviews for {}", query.display_name())
}

/// The company search targets the brand when one is known, since product
/// names rarely identify the manufacturer on their own.
#[must_use]
pub fn company_search_query(query: &ProductQuery) -> String {
    let subject = query
        .brand_name
        .as_deref()
        .unwrap_or(query.product_name.as_str());
    format!("Company information, history, and reliability for {subject}")
}

#[must_use]
pub fn review_prompt(query: &ProductQuery, research: &str) -> String {
    format!(
        "You are a customer review analyst. You read customer feedback, identify \
         patterns and report only on what customers say about this specific product.\n\
         \n\
         TASK: Analyze customer reviews for the product: {name}\n\
         URL: {url}\n\
         \n\
         CRITICAL INSTRUCTIONS:\n\
         1. Only analyze customer reviews and experiences with this specific product.\n\
         2. Do not analyze company information or general company reliability.\n\
         3. Base every point on the research below. Do not invent reviews.\n\
         4. Reply with a single JSON object and nothing else.\n\
         \n\
         RESEARCH:\n\
         {research}\n\
         REQUIRED OUTPUT FORMAT:\n\
         {REVIEW_OUTPUT_FORMAT}\n",
        name = query.display_name(),
        url = query.product_url,
    )
}

#[must_use]
pub fn company_prompt(query: &ProductQuery, research: &str) -> String {
    let brand_line = query
        .brand_name
        .as_deref()
        .map(|brand| format!("Brand: {brand}\n"))
        .unwrap_or_default();
    format!(
        "You are a company research analyst. You assess manufacturers on their \
         history, legal record, safety record and market standing.\n\
         \n\
         TASK: Analyze the company that makes the product: {name}\n\
         URL: {url}\n\
         {brand_line}\
         \n\
         CRITICAL INSTRUCTIONS:\n\
         1. Only analyze company-level information.\n\
         2. Do not analyze specific product reviews or customer experiences.\n\
         3. Focus on history, legal issues, safety records and market position.\n\
         4. Reply with a single JSON object and nothing else.\n\
         \n\
         RESEARCH:\n\
         {research}\n\
         REQUIRED OUTPUT FORMAT:\n\
         {COMPANY_OUTPUT_FORMAT}\n",
        name = query.product_name,
        url = query.product_url,
    )
}
