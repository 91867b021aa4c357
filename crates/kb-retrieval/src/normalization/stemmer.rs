//! Stemmers behind the `IStemmer` capability.

use kb_core::errors::{KbError, KbResult};
use kb_core::traits::IStemmer;

/// Suffixes stripped by [`FrenchLightStemmer`], longest first.
const FRENCH_SUFFIXES: &[&str] = &[
    "issements", "issement", "ations", "ation", "ements", "ement", "ances", "ance", "ences",
    "ence", "euses", "euse", "eurs", "eur", "ions", "ment", "ees", "ers", "ee", "es", "er",
    "ez", "e", "s", "x",
];

/// Shortest root the stemmer will produce.
const MIN_ROOT_CHARS: usize = 4;

/// Light French suffix stripper for normalized (accent-free) words.
///
/// Removes the first suffix in [`FRENCH_SUFFIXES`] that leaves a root of at
/// least four characters. Words that are already short are returned as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrenchLightStemmer;

impl IStemmer for FrenchLightStemmer {
    fn stem(&self, word: &str) -> KbResult<String> {
        if word.is_empty() {
            return Err(KbError::invalid_input("cannot stem an empty word"));
        }
        let char_count = word.chars().count();
        for suffix in FRENCH_SUFFIXES {
            if let Some(root) = word.strip_suffix(suffix) {
                if char_count - suffix.chars().count() >= MIN_ROOT_CHARS {
                    return Ok(root.to_string());
                }
            }
        }
        Ok(word.to_string())
    }

    fn name(&self) -> &str {
        "french-light"
    }
}

/// Identity stemmer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStemmer;

impl IStemmer for NoopStemmer {
    fn stem(&self, word: &str) -> KbResult<String> {
        Ok(word.to_string())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(w: &str) -> String {
        FrenchLightStemmer.stem(w).unwrap()
    }

    #[test]
    fn related_forms_share_a_root() {
        assert_eq!(stem("declarer"), "declar");
        assert_eq!(stem("declaration"), "declar");
        assert_eq!(stem("agences"), stem("agence"));
        assert_eq!(stem("assurance"), "assur");
    }

    #[test]
    fn short_roots_are_protected() {
        assert_eq!(stem("paiement"), "paie");
        assert_eq!(stem("auto"), "auto");
        assert_eq!(stem("sfax"), "sfax");
    }

    #[test]
    fn empty_word_is_an_error() {
        assert!(FrenchLightStemmer.stem("").is_err());
        assert_eq!(NoopStemmer.stem("agences").unwrap(), "agences");
    }
}
