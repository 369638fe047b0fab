use crate::constants::ISSUE_TAGS;

/// Extract issue tags from free review text.
///
/// Matching is a case-insensitive substring search, so short keywords fire
/// inside longer words ("ac" in "place", "key" in "monkey"). Callers depend on
/// that output, so the matcher stays literal. Tags come back in table order,
/// each at most once.
pub fn extract_issue_tags(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();

    ISSUE_TAGS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text_lower.contains(k)))
        .map(|(tag, _)| tag.to_string())
        .collect()
}
