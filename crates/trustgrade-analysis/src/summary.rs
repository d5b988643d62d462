//! Root-level summary built from the two one-sentence task summaries.

/// Returned when either task summary is absent or blank.
pub const FALLBACK_SUMMARY: &str = "Summary information from one or both agents is missing.";

const CLOSING_SENTENCE: &str = "Overall, the product and its manufacturer are considered trustworthy and a good choice in their category.";

/// Character budget for the composed summary. Counted in `char`s, not words.
pub const MAX_SUMMARY_CHARS: usize = 350;

/// Joins the review and company summaries with the closing sentence and
/// trims the result to [`MAX_SUMMARY_CHARS`] without ending mid-sentence.
///
/// Blank summaries count as missing; non-blank ones are joined verbatim,
/// surrounding whitespace included.
#[must_use]
pub fn compose_summary(review_summary: Option<&str>, company_summary: Option<&str>) -> String {
    let (Some(review), Some(company)) = (non_blank(review_summary), non_blank(company_summary))
    else {
        return FALLBACK_SUMMARY.to_string();
    };

    let combined = format!("{review} {company} {CLOSING_SENTENCE}");
    truncate_at_sentence(&combined, MAX_SUMMARY_CHARS)
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Cuts `text` to `max_chars`, then back to just after the last `.` in
/// that window. Without a period the hard cut is returned as is.
fn truncate_at_sentence(text: &str, max_chars: usize) -> String {
    let window = match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    };

    match window.rfind('.') {
        Some(pos) => window[..=pos].to_string(),
        None => window.to_string(),
    }
}
