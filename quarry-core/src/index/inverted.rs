//! Append-only inverted index.
//!
//! Stores the mapping `term → ascending posting list` plus per-(document,
//! term) frequencies and per-document lengths. Document identifiers are
//! assigned sequentially from 0, which is what lets ingestion keep every
//! posting list sorted and duplicate-free with a single tail comparison:
//! a term's list is appended to only when its last entry is not already the
//! document being ingested.
//!
//! Per-document tables are dense `Vec`s indexed by `DocId`; posting lists
//! are keyed directly on the owned term string.
//!
//! All read operations are total: unknown terms yield empty posting lists
//! and zero counts rather than errors.

use std::collections::HashMap;

use quarry_types::{DocId, PostingList};

/// In-memory inverted index with append-only ingestion.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, PostingList>,
    term_freqs: Vec<HashMap<String, u32>>,
    doc_lens: Vec<u32>,
}

impl InvertedIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one document's terms and returns its new identifier.
    ///
    /// Infallible: an empty term stream produces an empty document that
    /// still consumes an identifier.
    pub fn add_document<I, S>(&mut self, terms: I) -> DocId
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doc_id = self.doc_lens.len() as DocId;
        let mut freqs: HashMap<String, u32> = HashMap::new();
        let mut emitted = 0u32;

        for term in terms {
            let term = term.as_ref();
            let list = self.postings.entry(term.to_string()).or_default();
            // Doc ids are monotonic, so comparing against the tail is
            // enough to keep the list ascending and unique.
            if list.last() != Some(&doc_id) {
                list.push(doc_id);
            }
            *freqs.entry(term.to_string()).or_insert(0) += 1;
            emitted += 1;
        }

        self.term_freqs.push(freqs);
        self.doc_lens.push(emitted);
        doc_id
    }

    /// Ascending posting list for `term`; empty if the term is unknown.
    #[inline]
    pub fn posting_list(&self, term: &str) -> &[DocId] {
        self.postings.get(term).map_or(&[], |list| list.as_slice())
    }

    /// True if any document contains `term`.
    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    /// Number of documents containing `term`.
    #[inline]
    pub fn doc_freq(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, Vec::len)
    }

    /// Occurrences of `term` in `doc_id`; 0 if either is unknown.
    #[inline]
    pub fn term_freq(&self, doc_id: DocId, term: &str) -> u32 {
        self.term_freqs
            .get(doc_id as usize)
            .and_then(|freqs| freqs.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Total terms emitted for `doc_id` at ingestion (with repetitions);
    /// 0 if the document is unknown.
    #[inline]
    pub fn doc_len(&self, doc_id: DocId) -> u32 {
        self.doc_lens.get(doc_id as usize).copied().unwrap_or(0)
    }

    /// Number of ingested documents.
    #[inline]
    pub fn doc_count(&self) -> usize {
        self.doc_lens.len()
    }

    /// Number of distinct terms.
    #[inline]
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// True if no documents have been ingested.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.doc_lens.is_empty()
    }

    /// Arithmetic mean of document lengths; 0 when the index is empty.
    pub fn avg_doc_len(&self) -> f64 {
        if self.doc_lens.is_empty() {
            return 0.0;
        }
        let total: u64 = self.doc_lens.iter().map(|&len| len as u64).sum();
        total as f64 / self.doc_lens.len() as f64
    }

    /// Iterates all distinct terms, in no particular order.
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    /// Iterates `0..doc_count()` in order.
    pub fn all_doc_ids(&self) -> impl Iterator<Item = DocId> {
        0..self.doc_lens.len() as DocId
    }

    /// Resets the index to empty.
    pub fn clear(&mut self) {
        self.postings.clear();
        self.term_freqs.clear();
        self.doc_lens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(docs: &[&[&str]]) -> InvertedIndex {
        let mut index = InvertedIndex::new();
        for doc in docs {
            index.add_document(doc.iter());
        }
        index
    }

    #[test]
    fn doc_ids_are_sequential() {
        let mut index = InvertedIndex::new();
        assert_eq!(index.add_document(["a"]), 0);
        assert_eq!(index.add_document(["b"]), 1);
        assert_eq!(index.add_document(["c"]), 2);
        assert_eq!(index.doc_count(), 3);
    }

    #[test]
    fn posting_lists_ascending_and_unique() {
        let index = index_of(&[
            &["rust", "rust", "index"],
            &["index"],
            &["rust", "search"],
        ]);

        assert_eq!(index.posting_list("rust"), &[0, 2]);
        assert_eq!(index.posting_list("index"), &[0, 1]);
        for term in index.all_terms() {
            let list = index.posting_list(term);
            for pair in list.windows(2) {
                assert!(pair[0] < pair[1], "posting list must be strictly ascending");
            }
        }
    }

    #[test]
    fn term_frequencies_count_repetitions() {
        let index = index_of(&[&["a", "a", "a", "b"]]);
        assert_eq!(index.term_freq(0, "a"), 3);
        assert_eq!(index.term_freq(0, "b"), 1);
        assert_eq!(index.term_freq(0, "c"), 0);
        assert_eq!(index.term_freq(9, "a"), 0);
    }

    #[test]
    fn doc_len_equals_sum_of_frequencies() {
        let index = index_of(&[&["x", "y", "x"], &[], &["z"]]);
        assert_eq!(index.doc_len(0), 3);
        assert_eq!(index.doc_len(1), 0);
        assert_eq!(index.doc_len(2), 1);
        assert_eq!(index.doc_len(42), 0);

        for doc_id in index.all_doc_ids() {
            let total: u32 = index
                .all_terms()
                .map(|term| index.term_freq(doc_id, term))
                .sum();
            assert_eq!(total, index.doc_len(doc_id));
        }
    }

    #[test]
    fn membership_matches_positive_frequency() {
        let index = index_of(&[&["a", "b"], &["b"]]);
        for term in ["a", "b"] {
            for doc_id in index.all_doc_ids() {
                let in_list = index.posting_list(term).contains(&doc_id);
                assert_eq!(in_list, index.term_freq(doc_id, term) > 0);
            }
        }
    }

    #[test]
    fn unknown_term_lookups_are_empty() {
        let index = index_of(&[&["a"]]);
        assert!(index.posting_list("missing").is_empty());
        assert!(!index.contains_term("missing"));
        assert_eq!(index.doc_freq("missing"), 0);
    }

    #[test]
    fn average_document_length() {
        let mut index = InvertedIndex::new();
        assert_eq!(index.avg_doc_len(), 0.0);

        index.add_document(["a", "b"]);
        index.add_document(["c", "d", "e", "f"]);
        assert_eq!(index.avg_doc_len(), 3.0);
    }

    #[test]
    fn all_doc_ids_in_order() {
        let index = index_of(&[&["a"], &["b"], &["c"]]);
        let ids: Vec<DocId> = index.all_doc_ids().collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn clear_resets() {
        let mut index = index_of(&[&["a", "b"]]);
        assert!(!index.is_empty());

        index.clear();

        assert!(index.is_empty());
        assert_eq!(index.doc_count(), 0);
        assert_eq!(index.term_count(), 0);
        assert!(index.posting_list("a").is_empty());
        assert_eq!(index.add_document(["fresh"]), 0);
    }
}
