//! Test fixture loader for the knowledge-base corpus and golden datasets.
//!
//! Fixtures live in this crate's `fixtures/` directory and are reachable
//! from tests in any workspace crate.

use std::path::PathBuf;

use kb_core::models::KnowledgeEntry;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixtures folder.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

#[derive(Debug, Deserialize)]
struct KnowledgeBaseFile {
    count: usize,
    entries: Vec<KnowledgeEntry>,
}

/// The shared twelve-entry corpus. Entry 11 is inactive.
pub fn knowledge_base() -> Vec<KnowledgeEntry> {
    let file: KnowledgeBaseFile = load_fixture("knowledge_base.json");
    assert_eq!(file.count, file.entries.len(), "knowledge_base.json count mismatch");
    file.entries
}

/// One normalization golden case.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizationCase {
    pub input: String,
    pub normalized: String,
    pub keywords: Vec<String>,
}

pub fn normalization_cases() -> Vec<NormalizationCase> {
    #[derive(Deserialize)]
    struct File {
        cases: Vec<NormalizationCase>,
    }
    load_fixture::<File>("golden/normalization.json").cases
}

/// A query whose best hit over [`knowledge_base`] is known.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenQuery {
    pub query: String,
    #[serde(default)]
    pub intent: Option<String>,
    pub expected_top: i64,
}

pub fn golden_queries() -> Vec<GoldenQuery> {
    #[derive(Deserialize)]
    struct File {
        queries: Vec<GoldenQuery>,
    }
    load_fixture::<File>("golden/queries.json").queries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "fixtures directory not found");
    }

    #[test]
    fn all_fixture_files_exist() {
        for f in [
            "knowledge_base.json",
            "golden/normalization.json",
            "golden/queries.json",
        ] {
            assert!(fixture_exists(f), "Missing fixture: {f}");
        }
    }

    #[test]
    fn knowledge_base_parses_with_unique_ids() {
        let entries = knowledge_base();
        assert_eq!(entries.len(), 12);
        let mut ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 12);
        assert_eq!(entries.iter().filter(|e| !e.is_active).count(), 1);
    }

    #[test]
    fn golden_queries_reference_corpus_ids() {
        let ids: Vec<i64> = knowledge_base().iter().map(|e| e.id).collect();
        for q in golden_queries() {
            assert!(ids.contains(&q.expected_top), "{} -> {}", q.query, q.expected_top);
        }
        assert!(!normalization_cases().is_empty());
    }
}
