//! NormalizationEngine: text cleanup, keyword extraction, stemming, synonym
//! expansion and query-string building.
//!
//! Every operation is pure and never fails; the engine is immutable once
//! built and shared by `Arc`.

pub mod language;
pub mod stemmer;
pub mod stopwords;
pub mod text;
pub mod thesaurus;

use std::collections::BTreeSet;
use std::sync::Arc;

use kb_core::config::NormalizationConfig;
use kb_core::constants::{MAX_FALLBACK_PATTERNS, MAX_INDEX_TERMS};
use kb_core::models::{Language, QueryAnalysis};
use kb_core::traits::IStemmer;
use tracing::debug;

pub use language::detect_language;
pub use stemmer::{FrenchLightStemmer, NoopStemmer};
pub use stopwords::StopWords;
pub use text::normalize;
pub use thesaurus::Thesaurus;

/// Tokens this short never become keywords.
const MIN_KEYWORD_CHARS: usize = 3;

pub struct NormalizationEngine {
    stop_words: StopWords,
    thesaurus: Arc<Thesaurus>,
    stemmer: Arc<dyn IStemmer>,
    config: NormalizationConfig,
}

impl NormalizationEngine {
    /// French light stemmer, built-in stop-words and thesaurus, both
    /// extended from `config`.
    pub fn new(config: NormalizationConfig) -> Self {
        let thesaurus = Arc::new(Thesaurus::with_overrides(&config.synonyms));
        Self::with_parts(config, thesaurus, Arc::new(FrenchLightStemmer))
    }

    pub fn with_parts(
        config: NormalizationConfig,
        thesaurus: Arc<Thesaurus>,
        stemmer: Arc<dyn IStemmer>,
    ) -> Self {
        Self {
            stop_words: StopWords::new(&config.extra_stop_words),
            thesaurus,
            stemmer,
            config,
        }
    }

    pub fn thesaurus(&self) -> &Arc<Thesaurus> {
        &self.thesaurus
    }

    pub fn normalize(&self, text: &str) -> String {
        normalize(text)
    }

    /// Normalized tokens longer than two characters that are not
    /// stop-words, deduplicated in first-occurrence order and capped at
    /// `max_keywords`.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        self.keywords_of_normalized(&normalize(text))
    }

    fn keywords_of_normalized(&self, normalized: &str) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::new();
        for token in text::tokens(normalized) {
            if keywords.len() >= self.config.max_keywords {
                break;
            }
            if token.chars().count() < MIN_KEYWORD_CHARS || self.stop_words.contains(token) {
                continue;
            }
            if !keywords.iter().any(|k| k == token) {
                keywords.push(token.to_string());
            }
        }
        keywords
    }

    /// Root of `word`. A failing or empty stem falls back to the word.
    pub fn stem(&self, word: &str) -> String {
        match self.stemmer.stem(word) {
            Ok(root) if !root.is_empty() => root,
            Ok(_) => word.to_string(),
            Err(e) => {
                debug!(word, stemmer = self.stemmer.name(), error = %e, "stem failed, keeping word");
                word.to_string()
            }
        }
    }

    pub fn get_synonyms(&self, term: &str) -> BTreeSet<String> {
        self.thesaurus.get_synonyms(term)
    }

    /// keywords ∪ stems ∪ synonyms ∪ synonym stems.
    pub fn expand(&self, query: &str) -> BTreeSet<String> {
        let keywords = self.extract_keywords(query);
        let stems: Vec<String> = keywords.iter().map(|k| self.stem(k)).collect();
        let synonyms = self.synonyms_of(&keywords);
        self.expanded_terms(&keywords, &stems, &synonyms)
    }

    fn synonyms_of(&self, keywords: &[String]) -> BTreeSet<String> {
        keywords
            .iter()
            .flat_map(|k| self.thesaurus.ordered(k).iter().cloned())
            .collect()
    }

    fn expanded_terms(
        &self,
        keywords: &[String],
        stems: &[String],
        synonyms: &BTreeSet<String>,
    ) -> BTreeSet<String> {
        let mut terms: BTreeSet<String> = keywords.iter().chain(stems).cloned().collect();
        for syn in synonyms {
            terms.insert(syn.clone());
            terms.insert(self.stem(syn));
        }
        terms
    }

    /// FTS5 expression: keywords then stems, deduplicated, capped, each
    /// quoted with a prefix marker and OR-joined. Empty when there are no
    /// keywords.
    pub fn build_index_query(&self, query: &str) -> String {
        let keywords = self.extract_keywords(query);
        let stems: Vec<String> = keywords.iter().map(|k| self.stem(k)).collect();
        self.index_query(&keywords, &stems)
    }

    fn index_query(&self, keywords: &[String], stems: &[String]) -> String {
        let cap = self.config.max_index_terms.min(MAX_INDEX_TERMS);
        let mut terms: Vec<&str> = Vec::new();
        for term in keywords.iter().chain(stems) {
            if terms.len() >= cap {
                break;
            }
            if !terms.contains(&term.as_str()) {
                terms.push(term);
            }
        }
        terms
            .iter()
            .map(|t| format!("\"{}\"*", t.replace('"', "")))
            .collect::<Vec<_>>()
            .join(" OR ")
    }

    /// Substring patterns: each keyword followed by up to
    /// `max_synonyms_per_keyword` of its synonyms, capped overall.
    pub fn build_fallback_patterns(&self, query: &str) -> Vec<String> {
        self.fallback_patterns(&self.extract_keywords(query))
    }

    fn fallback_patterns(&self, keywords: &[String]) -> Vec<String> {
        let cap = self.config.max_fallback_patterns.min(MAX_FALLBACK_PATTERNS);
        let mut patterns: Vec<String> = Vec::new();
        for (keyword, group) in self.keyword_groups(keywords) {
            for p in std::iter::once(keyword).chain(group) {
                if patterns.len() >= cap {
                    return patterns;
                }
                if !patterns.iter().any(|existing| existing == p) {
                    patterns.push(p.to_string());
                }
            }
        }
        patterns
    }

    /// Each keyword paired with its top synonyms.
    pub fn keyword_groups<'a>(&'a self, keywords: &'a [String]) -> Vec<(&'a str, Vec<&'a str>)> {
        let per_keyword = self.config.max_synonyms_per_keyword;
        keywords
            .iter()
            .map(|k| {
                let synonyms = self
                    .thesaurus
                    .ordered(k)
                    .iter()
                    .take(per_keyword)
                    .map(String::as_str)
                    .collect();
                (k.as_str(), synonyms)
            })
            .collect()
    }

    pub fn detect_language(&self, query: &str) -> Language {
        detect_language(&normalize(query))
    }

    /// Build the full analysis of one query.
    pub fn analyze(&self, text: &str) -> QueryAnalysis {
        let normalized = normalize(text);
        let keywords = self.keywords_of_normalized(&normalized);
        let stems: Vec<String> = keywords.iter().map(|k| self.stem(k)).collect();
        let synonyms = self.synonyms_of(&keywords);
        let expanded_terms = self.expanded_terms(&keywords, &stems, &synonyms);
        let index_query = self.index_query(&keywords, &stems);
        let fallback_patterns = self.fallback_patterns(&keywords);
        let language = detect_language(&normalized);

        debug!(
            keywords = keywords.len(),
            expanded = expanded_terms.len(),
            language = language.as_str(),
            "query analyzed"
        );

        QueryAnalysis {
            original: text.to_string(),
            normalized,
            keywords,
            stems,
            synonyms,
            expanded_terms,
            language,
            index_query,
            fallback_patterns,
        }
    }
}

impl Default for NormalizationEngine {
    fn default() -> Self {
        Self::new(NormalizationConfig::default())
    }
}
