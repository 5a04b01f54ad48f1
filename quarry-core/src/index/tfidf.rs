//! TF-IDF ranking over the inverted index.
//!
//! Term frequency is normalized by document length; inverse document
//! frequency is smoothed as `ln((N + 1) / (df + 1)) + 1`, so a term found
//! in every document still contributes weight 1 and an unknown term
//! contributes 0. A document's score for a query is the sum of its
//! per-term tf·idf values; duplicated query terms contribute repeatedly.
//!
//! Ranking is deterministic: score descending, doc id ascending on ties.

use quarry_types::{DocId, SearchHit};

use super::boolean;
use super::inverted::InvertedIndex;

/// Read-only TF-IDF scoring view over an inverted index.
#[derive(Debug, Clone, Copy)]
pub struct TfIdf<'a> {
    index: &'a InvertedIndex,
}

impl<'a> TfIdf<'a> {
    /// Creates a view over `index`.
    pub const fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    /// Length-normalized term frequency; 0 for an empty or unknown document.
    pub fn tf(&self, doc_id: DocId, term: &str) -> f64 {
        let doc_len = self.index.doc_len(doc_id);
        if doc_len == 0 {
            return 0.0;
        }
        self.index.term_freq(doc_id, term) as f64 / doc_len as f64
    }

    /// Unnormalized term frequency.
    pub fn raw_tf(&self, doc_id: DocId, term: &str) -> f64 {
        self.index.term_freq(doc_id, term) as f64
    }

    /// Smoothed inverse document frequency; 0 when the index is empty or
    /// the term is unknown.
    pub fn idf(&self, term: &str) -> f64 {
        let num_docs = self.index.doc_count();
        let doc_freq = self.index.doc_freq(term);
        if num_docs == 0 || doc_freq == 0 {
            return 0.0;
        }
        ((num_docs as f64 + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0
    }

    /// Product of [`tf`](Self::tf) and [`idf`](Self::idf).
    pub fn tfidf(&self, doc_id: DocId, term: &str) -> f64 {
        self.tf(doc_id, term) * self.idf(term)
    }

    /// Sum of tf·idf over the query terms. Duplicates count twice; that is
    /// intentional.
    pub fn document_score<S: AsRef<str>>(&self, doc_id: DocId, query_terms: &[S]) -> f64 {
        query_terms
            .iter()
            .map(|term| self.tfidf(doc_id, term.as_ref()))
            .sum()
    }

    /// Per-term IDF weights for a query.
    pub fn term_weights<S: AsRef<str>>(&self, terms: &[S]) -> Vec<f64> {
        terms.iter().map(|term| self.idf(term.as_ref())).collect()
    }

    /// Ranks the documents matching any query term.
    ///
    /// Candidates are the union of the query terms' posting lists; documents
    /// scoring 0 are dropped, the rest are ordered by descending score with
    /// ascending doc id breaking ties, truncated to `top_k`.
    pub fn search<S: AsRef<str>>(&self, query_terms: &[S], top_k: usize) -> Vec<SearchHit> {
        let mut candidates: Vec<DocId> = Vec::new();
        for term in query_terms {
            candidates = boolean::union(&candidates, self.index.posting_list(term.as_ref()));
        }

        let mut hits: Vec<SearchHit> = candidates
            .into_iter()
            .map(|doc_id| SearchHit::new(doc_id, self.document_score(doc_id, query_terms)))
            .filter(|hit| hit.score > 0.0)
            .collect();

        hits.sort_unstable_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        hits.truncate(top_k);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::TextPipeline;

    fn index_of(docs: &[&str]) -> InvertedIndex {
        let pipeline = TextPipeline::new();
        let mut index = InvertedIndex::new();
        for doc in docs {
            index.add_document(pipeline.process(doc));
        }
        index
    }

    #[test]
    fn tf_is_length_normalized() {
        let index = index_of(&["python python python", "python java cpp"]);
        let tfidf = TfIdf::new(&index);

        assert_eq!(tfidf.tf(0, "python"), 1.0);
        assert!((tfidf.tf(1, "python") - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(tfidf.tf(7, "python"), 0.0);
        assert_eq!(tfidf.raw_tf(0, "python"), 3.0);
    }

    #[test]
    fn idf_smoothing() {
        let index = index_of(&["alpha beta", "alpha gamma", "alpha delta"]);
        let tfidf = TfIdf::new(&index);

        // Term in every document: ln(4/4) + 1 = 1.
        assert!((tfidf.idf("alpha") - 1.0).abs() < 1e-12);
        // Rarer term: ln(4/2) + 1.
        assert!((tfidf.idf("beta") - (2.0f64.ln() + 1.0)).abs() < 1e-12);
        // Unknown term contributes nothing.
        assert_eq!(tfidf.idf("omega"), 0.0);
    }

    #[test]
    fn frequency_skew_orders_results() {
        let index = index_of(&[
            "python python python",
            "python java cpp",
            "cooking italian recipes",
        ]);
        let tfidf = TfIdf::new(&index);

        let hits = tfidf.search(&["python"], 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].doc_id, 0);
        assert_eq!(hits[1].doc_id, 1);
        assert!(hits[0].score > hits[1].score);
        assert!(hits[1].score > 0.0);
    }

    #[test]
    fn equal_stats_tie_break_by_doc_id() {
        let index = index_of(&[
            "machine learning with python",
            "deep learning neural networks",
            "cooking italian recipes",
        ]);
        let pipeline = TextPipeline::new();
        let tfidf = TfIdf::new(&index);

        let hits = tfidf.search(&pipeline.process("learning"), 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].doc_id, 0);
        assert_eq!(hits[1].doc_id, 1);
        // Same normalized TF and same document frequency: identical scores.
        assert!((hits[0].score - hits[1].score).abs() < 1e-12);
        assert!(hits[0].score > 0.0);
    }

    #[test]
    fn duplicate_query_terms_stack() {
        let index = index_of(&["python java"]);
        let tfidf = TfIdf::new(&index);

        let single = tfidf.document_score(0, &["python"]);
        let double = tfidf.document_score(0, &["python", "python"]);
        assert!((double - 2.0 * single).abs() < 1e-12);
    }

    #[test]
    fn top_k_truncates() {
        let index = index_of(&["ada", "ada lovelace", "ada byron king"]);
        let tfidf = TfIdf::new(&index);

        let hits = tfidf.search(&["ada"], 2);
        assert_eq!(hits.len(), 2);
        assert!(tfidf.search(&["ada"], 0).is_empty());
    }

    #[test]
    fn empty_query_and_empty_index() {
        let empty = InvertedIndex::new();
        assert!(TfIdf::new(&empty).search(&["anything"], 10).is_empty());

        let index = index_of(&["some document"]);
        assert!(TfIdf::new(&index).search(&[] as &[&str], 10).is_empty());
    }

    #[test]
    fn term_weights_align_with_idf() {
        let index = index_of(&["alpha beta", "alpha gamma"]);
        let tfidf = TfIdf::new(&index);

        let weights = tfidf.term_weights(&["alpha", "beta", "omega"]);
        assert_eq!(weights.len(), 3);
        assert_eq!(weights[0], tfidf.idf("alpha"));
        assert_eq!(weights[2], 0.0);
    }
}
