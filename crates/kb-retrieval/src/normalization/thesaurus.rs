//! Curated bidirectional synonym dictionary.
//!
//! Each built-in group is a set of interchangeable terms: every member maps
//! to every other member. Configured synonyms are merged on top, in both
//! directions. Terms are stored normalized.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::text::normalize;

const GROUPS: &[&[&str]] = &[
    &["assurance", "couverture", "protection"],
    &["takaful", "assurance islamique"],
    &["sinistre", "accident", "dommage", "declaration"],
    &["automobile", "voiture", "vehicule", "auto"],
    &["habitation", "maison", "logement", "domicile"],
    &["sante", "maladie", "medical", "hospitalisation"],
    &["contact", "joindre", "telephone", "appeler"],
    &["agence", "agences", "bureau", "succursale"],
    &["paiement", "reglement", "versement", "cotisation"],
    &["souscription", "souscrire", "adhesion", "inscription"],
    &["contrat", "police"],
    &["prix", "tarif", "cout"],
    &["horaires", "ouverture", "heures"],
    &["remboursement", "indemnisation", "indemnite"],
];

/// Immutable synonym lookup, shared by `Arc` after construction.
#[derive(Debug, Clone, Default)]
pub struct Thesaurus {
    /// Insertion-ordered so "top N synonyms" is deterministic.
    entries: HashMap<String, Vec<String>>,
}

impl Thesaurus {
    /// Built-in groups only.
    pub fn builtin() -> Self {
        Self::with_overrides(&BTreeMap::new())
    }

    /// Built-in groups plus configured `term -> [synonyms]` pairs.
    pub fn with_overrides(extra: &BTreeMap<String, Vec<String>>) -> Self {
        let mut thesaurus = Self::default();
        for group in GROUPS {
            for (i, a) in group.iter().enumerate() {
                for (j, b) in group.iter().enumerate() {
                    if i != j {
                        thesaurus.link(a, b);
                    }
                }
            }
        }
        for (term, synonyms) in extra {
            let term = normalize(term);
            for syn in synonyms {
                let syn = normalize(syn);
                thesaurus.link(&term, &syn);
                thesaurus.link(&syn, &term);
            }
        }
        thesaurus
    }

    fn link(&mut self, from: &str, to: &str) {
        if from.is_empty() || to.is_empty() || from == to {
            return;
        }
        let list = self.entries.entry(from.to_string()).or_default();
        if !list.iter().any(|s| s == to) {
            list.push(to.to_string());
        }
    }

    /// Synonyms of a normalized term; empty if the term is unknown.
    pub fn get_synonyms(&self, term: &str) -> BTreeSet<String> {
        self.ordered(term).iter().cloned().collect()
    }

    /// Synonyms in curated order.
    pub fn ordered(&self, term: &str) -> &[String] {
        self.entries.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_bidirectional() {
        let t = Thesaurus::builtin();
        assert!(t.get_synonyms("voiture").contains("automobile"));
        assert!(t.get_synonyms("automobile").contains("voiture"));
    }

    #[test]
    fn unknown_term_is_empty() {
        assert!(Thesaurus::builtin().get_synonyms("zzz").is_empty());
    }

    #[test]
    fn overrides_are_normalized_and_merged() {
        let mut extra = BTreeMap::new();
        extra.insert("Wakala".to_string(), vec!["Mandat".to_string()]);
        let t = Thesaurus::with_overrides(&extra);
        assert!(t.get_synonyms("wakala").contains("mandat"));
        assert!(t.get_synonyms("mandat").contains("wakala"));
        assert!(t.get_synonyms("voiture").contains("auto"));
    }

    #[test]
    fn ordered_keeps_curated_order() {
        let t = Thesaurus::builtin();
        assert_eq!(t.ordered("sinistre")[0], "accident");
    }
}
