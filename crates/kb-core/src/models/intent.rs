use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Metadata;

/// A conversational intent detected upstream of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    pub confidence: f64,
    /// Extracted entity name → value. Values found in an entry's content
    /// earn a scoring bonus.
    #[serde(default)]
    pub entities: BTreeMap<String, String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Intent {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
            entities: BTreeMap::new(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_entity(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.insert(key.into(), value.into());
        self
    }
}
