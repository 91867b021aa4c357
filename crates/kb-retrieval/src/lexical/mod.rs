//! LexicalIndex: ranked full-text search with a substring fallback.
//!
//! The index itself lives in storage (FTS5, kept in sync by triggers). This
//! layer runs the query, and when the index comes back empty or errors it
//! falls back to substring matching over the active entries.

pub mod fallback;

use std::sync::Arc;

use kb_core::constants::COMPONENT_LEXICAL;
use kb_core::errors::KbResult;
use kb_core::models::{DegradationEvent, MatchReason, QueryAnalysis, ScoredEntry, SearchMethod};
use kb_core::traits::IKnowledgeStorage;
use tracing::{debug, warn};

use crate::normalization::text::normalize;

/// Outcome of one lexical search.
#[derive(Debug, Clone)]
pub struct LexicalOutcome {
    pub entries: Vec<ScoredEntry>,
    /// `FullText`, `SubstringFallback` or `None` when nothing matched.
    pub method: SearchMethod,
    /// Set when the index failed and the fallback served the query.
    pub degradation: Option<DegradationEvent>,
    /// The full-text index was queried and answered, with or without hits.
    pub index_answered: bool,
}

impl LexicalOutcome {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            method: SearchMethod::None,
            degradation: None,
            index_answered: false,
        }
    }
}

pub struct LexicalIndex {
    storage: Arc<dyn IKnowledgeStorage>,
}

impl LexicalIndex {
    pub fn new(storage: Arc<dyn IKnowledgeStorage>) -> Self {
        Self { storage }
    }

    /// Search the full-text index, falling back to substring matching when
    /// it yields nothing. Scores are BM25-derived for full-text hits and
    /// field-priority based for fallback hits.
    pub fn search(&self, analysis: &QueryAnalysis, limit: usize) -> KbResult<LexicalOutcome> {
        if analysis.is_empty() || limit == 0 {
            return Ok(LexicalOutcome::empty());
        }

        let mut degradation = None;
        let mut index_answered = false;
        if !analysis.index_query.is_empty() {
            match self.storage.search_fulltext(&analysis.index_query, limit) {
                Ok(rows) if !rows.is_empty() => {
                    debug!(hits = rows.len(), "full-text search hit");
                    let entries = rows
                        .into_iter()
                        .map(|(entry, score)| {
                            let matched = matched_keywords(&entry, &analysis.keywords);
                            ScoredEntry::new(entry, score, MatchReason::FullText)
                                .with_matched(matched)
                        })
                        .collect();
                    return Ok(LexicalOutcome {
                        entries,
                        method: SearchMethod::FullText,
                        degradation: None,
                        index_answered: true,
                    });
                }
                Ok(_) => {
                    debug!("full-text search empty, trying substring fallback");
                    index_answered = true;
                }
                Err(e) if e.is_index_unavailable() => {
                    warn!(error = %e, "full-text index unavailable, using substring fallback");
                    degradation = Some(DegradationEvent::new(
                        COMPONENT_LEXICAL,
                        e.to_string(),
                        SearchMethod::SubstringFallback.as_str(),
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        let active = self.storage.read_active_entries()?;
        let mut entries = fallback::phrase_matches(&active, &analysis.normalized);
        if entries.is_empty() {
            entries = fallback::first_keyword_matches(&active, &keyword_groups(analysis));
        }
        entries.truncate(limit);
        for scored in &mut entries {
            scored.matched_keywords = matched_keywords(&scored.entry, &analysis.keywords);
        }

        let method = if entries.is_empty() {
            SearchMethod::None
        } else {
            SearchMethod::SubstringFallback
        };
        Ok(LexicalOutcome {
            entries,
            method,
            degradation,
            index_answered,
        })
    }
}

/// Split `fallback_patterns` into runs headed by a keyword: the keyword
/// followed by the synonym patterns built for it.
fn keyword_groups(analysis: &QueryAnalysis) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for pattern in &analysis.fallback_patterns {
        if analysis.keywords.contains(pattern) {
            groups.push((pattern.clone(), vec![pattern.clone()]));
        } else if let Some((_, patterns)) = groups.last_mut() {
            patterns.push(pattern.clone());
        }
    }
    groups
}

/// Query keywords present in the entry's normalized title, keywords or
/// content.
pub fn matched_keywords(entry: &kb_core::KnowledgeEntry, keywords: &[String]) -> Vec<String> {
    let haystack = normalize(&format!(
        "{} {} {}",
        entry.title,
        entry.keywords_text(),
        entry.content
    ));
    keywords
        .iter()
        .filter(|k| haystack.contains(k.as_str()))
        .cloned()
        .collect()
}
