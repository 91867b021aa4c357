//! Per-strategy base score of one entry against one query.
//!
//! Additive field bonuses:
//!   +0.30 per query keyword in the title
//!   +0.25 per query keyword in the keyword field
//!   +0.15 per query keyword in the content
//!   +0.20 if the requested category is the entry's category
//!   +0.10 per intent entity value found in the content
//! then multiplied by `1 + priority * 0.1` and clamped to 1.0.

use kb_core::models::{Category, Intent, KnowledgeEntry, QueryAnalysis};

use crate::normalization::text::normalize;

const TITLE_BONUS: f64 = 0.3;
const KEYWORD_FIELD_BONUS: f64 = 0.25;
const CONTENT_BONUS: f64 = 0.15;
const CATEGORY_BONUS: f64 = 0.2;
const ENTITY_BONUS: f64 = 0.1;
const MAX_STRATEGY_SCORE: f64 = 1.0;

/// Base score, clamped to 1.0. Keywords match a field when the keyword or
/// its stem occurs in the field's normalized text.
pub fn score_entry(
    entry: &KnowledgeEntry,
    analysis: &QueryAnalysis,
    category: Option<Category>,
    intent: Option<&Intent>,
) -> f64 {
    let title = normalize(&entry.title);
    let keyword_field = normalize(&entry.keywords_text());
    let content = normalize(&entry.content);

    let mut score = 0.0;
    for (i, keyword) in analysis.keywords.iter().enumerate() {
        let stem = analysis.stems.get(i).map(String::as_str);
        let in_field = |field: &str| {
            field.contains(keyword.as_str()) || stem.is_some_and(|s| field.contains(s))
        };
        if in_field(&title) {
            score += TITLE_BONUS;
        }
        if in_field(&keyword_field) {
            score += KEYWORD_FIELD_BONUS;
        }
        if in_field(&content) {
            score += CONTENT_BONUS;
        }
    }

    if category == Some(entry.category) {
        score += CATEGORY_BONUS;
    }

    if let Some(intent) = intent {
        for value in intent.entities.values() {
            let value = normalize(value);
            if !value.is_empty() && content.contains(&value) {
                score += ENTITY_BONUS;
            }
        }
    }

    (score * entry.priority_boost()).min(MAX_STRATEGY_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::NormalizationEngine;

    fn analysis(q: &str) -> QueryAnalysis {
        NormalizationEngine::default().analyze(q)
    }

    #[test]
    fn field_bonuses_add_up() {
        let e = KnowledgeEntry::new(Category::Payment, "Modes de paiement", "Le paiement par virement.")
            .with_keywords(["paiement"]);
        let s = score_entry(&e, &analysis("paiement"), None, None);
        assert!((s - 0.7).abs() < 1e-9);
    }

    #[test]
    fn stems_match_inflections() {
        let e = KnowledgeEntry::new(Category::Agencies, "Nos agences", "").with_keywords(["agence"]);
        let s = score_entry(&e, &analysis("agences"), None, None);
        assert!((s - 0.55).abs() < 1e-9);
    }

    #[test]
    fn category_bonus_and_priority() {
        let e = KnowledgeEntry::new(Category::Contact, "Contact", "").with_priority(5);
        let s = score_entry(&e, &analysis("joindre"), Some(Category::Contact), None);
        assert!((s - 0.3).abs() < 1e-9);
        let none = score_entry(&e, &analysis("joindre"), Some(Category::Claims), None);
        assert_eq!(none, 0.0);
    }

    #[test]
    fn entity_values_found_in_content() {
        let e = KnowledgeEntry::new(Category::Agencies, "Agences", "Présentes à Sfax et Sousse.");
        let intent = Intent::new("agency_locator", 0.9).with_entity("city", "Sfax");
        let s = score_entry(&e, &analysis("agences"), None, Some(&intent));
        assert!((s - 0.4).abs() < 1e-9);
    }

    #[test]
    fn score_is_clamped() {
        let e = KnowledgeEntry::new(
            Category::Claims,
            "Déclarer un sinistre",
            "Déclarer un sinistre rapidement.",
        )
        .with_keywords(["sinistre", "declaration"])
        .with_priority(10);
        let s = score_entry(&e, &analysis("déclarer sinistre"), Some(Category::Claims), None);
        assert_eq!(s, 1.0);
    }
}
