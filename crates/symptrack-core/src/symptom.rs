//! Keyword-based symptom tagging.
//!
//! Matching is plain substring containment on the lower-cased text, so
//! "feverish" tags Fever and "shortness of breath" tags Respiratory.

use crate::SymptomCategory;

/// Label used when no category keyword matches.
pub const OTHER_CATEGORY: &str = "Other";

/// Separator between categories in a composite label.
pub const CATEGORY_SEPARATOR: &str = ", ";

/// Keywords per category, in declaration order.
pub const SYMPTOM_KEYWORDS: &[(SymptomCategory, &[&str])] = &[
    (
        SymptomCategory::Respiratory,
        &["cough", "breathing", "shortness", "respiratory"],
    ),
    (SymptomCategory::Fever, &["fever", "temperature"]),
    (SymptomCategory::Fatigue, &["tired", "fatigue", "weakness"]),
    (SymptomCategory::Headache, &["headache", "migraine"]),
];

/// All categories whose keywords occur in `text`, in declaration order.
pub fn tag_symptoms(text: &str) -> Vec<SymptomCategory> {
    let lower = text.to_lowercase();
    SYMPTOM_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(category, _)| *category)
        .collect()
}

/// Composite category label for `text`: matching categories joined with
/// `", "`, or `"Other"` when nothing matches.
pub fn symptom_category(text: &str) -> String {
    let tags = tag_symptoms(text);
    if tags.is_empty() {
        return OTHER_CATEGORY.to_string();
    }
    tags.iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(CATEGORY_SEPARATOR)
}
