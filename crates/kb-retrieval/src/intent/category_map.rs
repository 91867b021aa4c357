//! Intent → categories map.
//!
//! Each intent resolves to an ordered list of categories with a boost
//! multiplier: 1.0 is neutral, curated high-value categories go up to 1.2.
//! Built-in defaults can be overridden per intent from TOML config.

use std::collections::HashMap;

use kb_core::config::{CategoryWeight, IntentConfig};
use kb_core::models::Category;

/// Immutable intent → `[(category, weight)]` lookup.
#[derive(Debug, Clone)]
pub struct IntentCategoryMap {
    mappings: HashMap<String, Vec<(Category, f64)>>,
}

impl Default for IntentCategoryMap {
    fn default() -> Self {
        Self::default_mappings()
    }
}

impl IntentCategoryMap {
    /// Built-in mappings.
    pub fn default_mappings() -> Self {
        let mut mappings = HashMap::new();

        // Contact details and how to reach the company.
        mappings.insert(
            "contact_info".to_string(),
            vec![(Category::Contact, 1.0), (Category::Agencies, 0.8)],
        );

        // Locating a branch.
        mappings.insert(
            "agency_locator".to_string(),
            vec![(Category::Agencies, 1.2), (Category::Contact, 0.8)],
        );

        // What takaful is and how it works.
        mappings.insert(
            "takaful_info".to_string(),
            vec![
                (Category::Takaful, 1.2),
                (Category::TakafulServices, 1.0),
                (Category::Faq, 0.8),
            ],
        );

        mappings.insert(
            "product_info".to_string(),
            vec![(Category::Products, 1.2), (Category::TakafulServices, 1.0)],
        );

        mappings.insert(
            "claim_declaration".to_string(),
            vec![(Category::Claims, 1.2), (Category::Agencies, 0.8)],
        );

        mappings.insert(
            "subscription".to_string(),
            vec![(Category::Subscription, 1.2), (Category::Products, 0.9)],
        );

        mappings.insert(
            "payment_info".to_string(),
            vec![(Category::Payment, 1.2), (Category::Subscription, 0.8)],
        );

        mappings.insert(
            "company_info".to_string(),
            vec![(Category::Company, 1.0), (Category::Legal, 0.8)],
        );

        mappings.insert(
            "faq".to_string(),
            vec![(Category::Faq, 1.0), (Category::General, 0.8)],
        );

        mappings.insert("general".to_string(), vec![(Category::General, 1.0)]);

        Self { mappings }
    }

    /// Defaults with `config` overriding whole intents.
    pub fn from_config(config: &IntentConfig) -> Self {
        let mut map = Self::default_mappings();
        for (intent, categories) in &config.mappings {
            map.set(intent, categories);
        }
        map
    }

    fn set(&mut self, intent: &str, categories: &[CategoryWeight]) {
        let list = categories.iter().map(|c| (c.category, c.weight)).collect();
        self.mappings.insert(intent.to_string(), list);
    }

    /// Categories for an intent, most relevant first; empty when unmapped.
    pub fn categories(&self, intent: &str) -> &[(Category, f64)] {
        self.mappings.get(intent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_mapped(&self, intent: &str) -> bool {
        self.mappings.contains_key(intent)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
