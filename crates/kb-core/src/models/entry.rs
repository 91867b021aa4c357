use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;
use crate::constants::MAX_PRIORITY;

/// Open, string-keyed metadata attached to entries and intents.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A curated knowledge-base entry. Owned by the knowledge store; the engine
/// only reads it and mirrors it into its indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Store-assigned id. Zero until persisted.
    pub id: i64,
    pub category: Category,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// 0–10, higher is boosted during scoring.
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Metadata,
}

fn default_active() -> bool {
    true
}

impl KnowledgeEntry {
    /// A new, active, unpersisted entry.
    pub fn new(category: Category, title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            category,
            title: title.into(),
            content: content.into(),
            keywords: Vec::new(),
            tags: Vec::new(),
            priority: None,
            is_active: true,
            created_at: now,
            updated_at: now,
            metadata: Metadata::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Priority is clamped to 0–10.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority.min(MAX_PRIORITY));
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Priority as a scoring multiplier: `1 + priority * 0.1`.
    pub fn priority_boost(&self) -> f64 {
        let p = self.priority.unwrap_or(0).min(MAX_PRIORITY);
        1.0 + f64::from(p) * 0.1
    }

    /// Text fed to the embedding provider.
    pub fn embedding_text(&self) -> String {
        format!("{}\n{}", self.title, self.content)
    }

    /// Keywords joined by spaces, as indexed.
    pub fn keywords_text(&self) -> String {
        self.keywords.join(" ")
    }

    /// blake3 hash of the embedded text, used to skip unchanged re-embeds.
    pub fn content_hash(&self) -> String {
        blake3::hash(self.embedding_text().as_bytes())
            .to_hex()
            .to_string()
    }
}
