//! Domain stop-word set. Stored in normalized (accent-free, lowercase) form
//! so it is checked against normalized tokens.

use std::collections::HashSet;

use super::text::normalize;

const FRENCH: &[&str] = &[
    "les", "des", "une", "est", "que", "qui", "quoi", "pour", "par", "sur", "dans", "avec",
    "sans", "sous", "aux", "ces", "ses", "mes", "tes", "nos", "vos", "leur", "leurs", "mon",
    "ton", "son", "notre", "votre", "elle", "ils", "elles", "nous", "vous", "moi", "toi",
    "lui", "sont", "suis", "etre", "avoir", "ont", "avez", "avons", "fait", "faire", "peut",
    "peux", "puis", "comment", "pourquoi", "quand", "quel", "quelle", "quels", "quelles",
    "combien", "cette", "cet", "ceci", "cela", "mais", "donc", "car", "tout", "tous", "toute",
    "toutes", "tres", "plus", "moins", "aussi", "bien", "etc", "alors", "ainsi", "chez",
    "entre", "vers", "veux", "voudrais", "aimerais", "savoir", "dire",
];

const ENGLISH: &[&str] = &[
    "the", "and", "for", "are", "was", "were", "what", "how", "why", "when", "where", "who",
    "which", "with", "this", "that", "these", "those", "you", "your", "our", "can", "could",
    "would", "should", "have", "has", "had", "does", "did", "not", "from", "about", "into",
    "want", "need", "please", "tell",
];

/// Conversational filler that never helps retrieval.
const DOMAIN: &[&str] = &[
    "bonjour", "bonsoir", "salut", "merci", "svp", "stp", "hello", "thanks", "thank",
];

/// Immutable stop-word set.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl StopWords {
    /// Built-in set plus `extra` words (normalized before insertion).
    pub fn new(extra: &[String]) -> Self {
        let mut words: HashSet<String> = FRENCH
            .iter()
            .chain(ENGLISH)
            .chain(DOMAIN)
            .map(|w| w.to_string())
            .collect();
        words.extend(extra.iter().map(|w| normalize(w)).filter(|w| !w.is_empty()));
        Self { words }
    }

    /// Expects a normalized token.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_words_present() {
        let sw = StopWords::default();
        for w in ["est", "que", "comment", "vous", "the", "merci"] {
            assert!(sw.contains(w), "{w} should be a stop-word");
        }
        assert!(!sw.contains("takaful"));
        assert!(!sw.contains("sinistre"));
    }

    #[test]
    fn extra_words_are_normalized() {
        let sw = StopWords::new(&["Réclamation".to_string()]);
        assert!(sw.contains("reclamation"));
    }
}
