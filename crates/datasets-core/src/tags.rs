//! Tag derivation for datasets
//!
//! Two flavours exist:
//! - [`domain_tags`]: the single owner-domain tag carried by API views
//! - [`dataset_tags`]: domain tag followed by topic tags guessed from the name

use crate::domain_from_email;

/// Topic tags and the name keywords that trigger them
const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    ("agriculture", &["crop", "agriculture", "farming"]),
    ("finance", &["financial", "finance", "money"]),
    ("healthcare", &["health", "medical", "patient"]),
    ("education", &["education", "student", "school"]),
];

/// Single-element tag list holding the owner's email domain.
pub fn domain_tags(email: &str) -> Vec<String> {
    vec![domain_from_email(email).to_string()]
}

/// Topic tags inferred from keywords in a dataset name (case-insensitive).
pub fn topic_tags(dataset_name: &str) -> Vec<&'static str> {
    let name = dataset_name.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| name.contains(kw)))
        .map(|(tag, _)| *tag)
        .collect()
}

/// Domain tag (when non-empty) followed by topic tags.
pub fn dataset_tags(email: &str, dataset_name: &str) -> Vec<String> {
    let domain = domain_from_email(email);
    let mut tags = Vec::new();
    if !domain.is_empty() {
        tags.push(domain.to_string());
    }
    tags.extend(topic_tags(dataset_name).into_iter().map(str::to_string));
    tags
}
