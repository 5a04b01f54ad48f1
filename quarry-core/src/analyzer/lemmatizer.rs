//! Dictionary lemmatizer with stemmer fallback.
//!
//! Maps an English surface form to its dictionary base form: `children` →
//! `child`, `were` → `be`, `better` → `good`. Only irregular forms are in
//! the dictionary; anything else falls through to the Porter stemmer, so
//! the lemmatizer is total and never produces an empty result for a
//! non-empty word.
//!
//! The dictionary is built once per process from the static tables in
//! [`irregular`](super::irregular) and shared by every lemmatizer instance.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::irregular;
use super::stemmer;

lazy_static! {
    static ref DICTIONARY: HashMap<&'static str, &'static str> = {
        let tables = [
            irregular::VERBS,
            irregular::ADVERBS,
            irregular::NOUNS,
            irregular::ADJECTIVES,
        ];
        let mut dict = HashMap::new();
        // Table order matters: later tables shadow earlier ones for shared
        // forms ("better" takes the adjective base, not the adverb one).
        for table in tables {
            for &(form, base) in table {
                dict.insert(form, base);
            }
        }
        dict
    };
}

/// Irregular-forms lemmatizer.
///
/// Lookup is case-insensitive (input is lowered first). A miss falls
/// through to [`stemmer::stem`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    /// Creates a lemmatizer backed by the process-wide dictionary.
    pub fn new() -> Self {
        Self
    }

    /// Returns the base form of `word`.
    pub fn lemmatize(&self, word: &str) -> String {
        let lower = word.to_ascii_lowercase();
        match DICTIONARY.get(lower.as_str()) {
            Some(&base) => base.to_string(),
            None => stemmer::stem(&lower),
        }
    }

    /// True if `word` has an irregular-forms dictionary entry.
    pub fn is_irregular(&self, word: &str) -> bool {
        DICTIONARY.contains_key(word.to_ascii_lowercase().as_str())
    }
}

/// Convenience free function mirroring [`stemmer::stem`].
pub fn lemmatize(word: &str) -> String {
    Lemmatizer::new().lemmatize(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_verbs() {
        assert_eq!(lemmatize("were"), "be");
        assert_eq!(lemmatize("went"), "go");
        assert_eq!(lemmatize("brought"), "bring");
        assert_eq!(lemmatize("underwent"), "undergo");
        assert_eq!(lemmatize("overtaken"), "overtake");
    }

    #[test]
    fn irregular_nouns() {
        assert_eq!(lemmatize("children"), "child");
        assert_eq!(lemmatize("mice"), "mouse");
        assert_eq!(lemmatize("data"), "datum");
        assert_eq!(lemmatize("indices"), "index");
        assert_eq!(lemmatize("sheep"), "sheep");
    }

    #[test]
    fn adjective_base_wins_over_adverb() {
        assert_eq!(lemmatize("better"), "good");
        assert_eq!(lemmatize("worst"), "bad");
        assert_eq!(lemmatize("eldest"), "old");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lemmatize("Children"), "child");
        assert_eq!(lemmatize("WERE"), "be");
    }

    #[test]
    fn miss_falls_through_to_stemmer() {
        assert_eq!(lemmatize("jumping"), "jump");
        assert_eq!(lemmatize("relational"), "relat");
    }

    #[test]
    fn running_is_irregular_but_agrees_with_stemmer() {
        assert!(Lemmatizer::new().is_irregular("running"));
        assert_eq!(lemmatize("running"), "run");
    }
}
