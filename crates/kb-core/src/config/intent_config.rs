use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Category;

/// One category mapped from an intent, with its boost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub category: Category,
    #[serde(default = "neutral_weight")]
    pub weight: f64,
}

fn neutral_weight() -> f64 {
    1.0
}

/// Intent → categories overrides, merged over the built-in map.
///
/// ```toml
/// [intents.mappings]
/// claim_request = [{ category = "claims", weight = 1.2 }]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentConfig {
    pub mappings: BTreeMap<String, Vec<CategoryWeight>>,
}
