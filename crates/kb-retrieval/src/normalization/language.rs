//! Function-word language heuristic. Informational only.

use std::sync::LazyLock;

use kb_core::models::Language;
use regex::Regex;

static ARABIC_SCRIPT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\p{Arabic}").ok());

const FRENCH_MARKERS: &[&str] = &[
    "le", "la", "les", "de", "des", "du", "un", "une", "est", "et", "que", "qui", "pour",
    "vous", "nous", "comment", "je", "mon", "ma", "mes", "votre", "quel", "quelle", "ou",
    "sont", "avec",
];

const ENGLISH_MARKERS: &[&str] = &[
    "the", "is", "are", "what", "how", "my", "i", "you", "to", "of", "and", "where", "can",
    "do", "your", "with",
];

const ARABIC_MARKERS: &[&str] = &["في", "من", "على", "ما", "هل", "كيف", "عن", "الى"];

/// Count known function words per language in normalized text; Arabic
/// script letters count towards Arabic as well. Ties and zero counts yield
/// [`Language::Unknown`].
pub fn detect_language(normalized: &str) -> Language {
    let mut french = 0usize;
    let mut english = 0usize;
    let mut arabic = 0usize;

    for token in super::text::tokens(normalized) {
        if FRENCH_MARKERS.contains(&token) {
            french += 1;
        }
        if ENGLISH_MARKERS.contains(&token) {
            english += 1;
        }
        if ARABIC_MARKERS.contains(&token) {
            arabic += 1;
        }
        if let Some(re) = ARABIC_SCRIPT.as_ref() {
            if re.is_match(token) {
                arabic += 1;
            }
        }
    }

    let best = french.max(english).max(arabic);
    if best == 0 {
        return Language::Unknown;
    }
    match (french == best, english == best, arabic == best) {
        (true, false, false) => Language::French,
        (false, true, false) => Language::English,
        (false, false, true) => Language::Arabic,
        _ => Language::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_language() {
        assert_eq!(detect_language("comment declarer un sinistre"), Language::French);
        assert_eq!(detect_language("how do i file a claim"), Language::English);
        assert_eq!(detect_language("كيف اصرح بحادث"), Language::Arabic);
    }

    #[test]
    fn no_markers_is_unknown() {
        assert_eq!(detect_language("takaful"), Language::Unknown);
        assert_eq!(detect_language(""), Language::Unknown);
    }
}
