//! Typed review and company records produced by the two analysis tasks.
//!
//! Decoding is strict about required fields but lenient about the value
//! drift model output tends to show: scores and counts may arrive as
//! numeric strings or floats, free-text company fields may arrive as
//! numbers or string lists, and an unrecognised sentiment reads as neutral.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

impl<'de> Deserialize<'de> for Sentiment {
    /// Anything other than `positive` or `negative` (any case) is neutral,
    /// so a stray label like `"mixed"` never costs the record its scores.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let sentiment = match Value::deserialize(deserializer)? {
            Value::String(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "positive" => Sentiment::Positive,
                "negative" => Sentiment::Negative,
                _ => Sentiment::Neutral,
            },
            _ => Sentiment::Neutral,
        };
        Ok(sentiment)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(deserialize_with = "score")]
    pub average_customer_rating: f64,
    #[serde(deserialize_with = "count")]
    pub total_reviews_analyzed: u64,
    pub customer_sentiment_summary: Sentiment,
    #[serde(default)]
    pub key_positive_points: Vec<String>,
    #[serde(default)]
    pub key_negative_points: Vec<String>,
    #[serde(default)]
    pub common_issues: Vec<String>,
    #[serde(deserialize_with = "score")]
    pub overall_product_reliability_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// One sentence, at most 50 words. Not enforced here.
    #[serde(default)]
    pub final_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub company_name: String,
    #[serde(deserialize_with = "free_text")]
    pub years_in_market: String,
    #[serde(deserialize_with = "free_text")]
    pub safety_issues: String,
    #[serde(deserialize_with = "free_text")]
    pub legal_issues: String,
    #[serde(deserialize_with = "score")]
    pub company_reliability_score: f64,
    #[serde(deserialize_with = "free_text")]
    pub market_position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub final_summary: String,
}

/// Converts a JSON value into a finite score.
///
/// Accepts JSON numbers and strings holding a number (`"8.5"`). Anything
/// else, including NaN and infinities, yields `None`.
#[must_use]
pub fn parse_score(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    parse_score(&value)
        .ok_or_else(|| de::Error::custom(format!("expected a numeric score, got {value}")))
}

/// Accepts `150`, `150.0` and `"150"`. Negative or fractional values fail.
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    value
        .as_u64()
        .or_else(|| parse_score(&value).and_then(whole_number))
        .ok_or_else(|| de::Error::custom(format!("expected a whole-number count, got {value}")))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(n: f64) -> Option<u64> {
    // 2^64; anything at or above it does not fit.
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;
    (n >= 0.0 && n.fract().abs() < f64::EPSILON && n < LIMIT).then_some(n as u64)
}

fn free_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(items) => Ok(items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; ")),
        other => Err(de::Error::custom(format!("expected text, got {other}"))),
    }
}
