//! Retrieval core: inverted index, Boolean search, TF-IDF ranking.
//!
//! The index is a single in-memory structure grown by appending documents
//! with monotonically increasing identifiers. Boolean search and TF-IDF
//! ranking are read-only views borrowing the index; they never mutate it
//! and are safe to use side by side.

pub mod boolean;
pub mod inverted;
pub mod tfidf;

pub use boolean::BooleanSearch;
pub use inverted::InvertedIndex;
pub use tfidf::TfIdf;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::TextPipeline;
    use quarry_types::DocId;

    fn ingest(docs: &[&str]) -> InvertedIndex {
        let pipeline = TextPipeline::new();
        let mut index = InvertedIndex::new();
        for doc in docs {
            index.add_document(pipeline.process(doc));
        }
        index
    }

    /// The universal invariants hold after every mutation.
    fn assert_invariants(index: &InvertedIndex) {
        for term in index.all_terms() {
            let list = index.posting_list(term);
            for pair in list.windows(2) {
                assert!(pair[0] < pair[1], "posting list for {term:?} not ascending");
            }
        }

        for doc_id in index.all_doc_ids() {
            let total: u32 = index
                .all_terms()
                .map(|term| index.term_freq(doc_id, term))
                .sum();
            assert_eq!(total, index.doc_len(doc_id));

            for term in index.all_terms() {
                assert_eq!(
                    index.posting_list(term).contains(&doc_id),
                    index.term_freq(doc_id, term) > 0
                );
            }
        }

        let ids: Vec<DocId> = index.all_doc_ids().collect();
        let expected: Vec<DocId> = (0..index.doc_count() as DocId).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn invariants_hold_while_growing() {
        let pipeline = TextPipeline::new();
        let mut index = InvertedIndex::new();
        assert_invariants(&index);

        for doc in [
            "the quick brown fox",
            "jumped over the lazy dog",
            "the dog barked back",
            "foxes and dogs running everywhere",
        ] {
            index.add_document(pipeline.process(doc));
            assert_invariants(&index);
        }

        index.clear();
        assert_invariants(&index);
    }

    #[test]
    fn indexed_terms_are_findable() {
        let index = ingest(&["relational databases", "conditional logic"]);

        // Every indexed term has a non-empty ascending posting list.
        for term in index.all_terms() {
            assert!(!index.posting_list(term).is_empty());
        }
        assert!(index.contains_term("relat"));
        assert!(index.contains_term("condit"));
    }

    #[test]
    fn boolean_and_ranking_agree_on_membership() {
        let index = ingest(&[
            "rust search engine",
            "rust compiler internals",
            "gardening for beginners",
        ]);
        let pipeline = TextPipeline::new();

        let boolean_hits = BooleanSearch::new(&index).query("rust", &pipeline);
        let ranked_hits = TfIdf::new(&index).search(&pipeline.process("rust"), 10);

        let ranked_ids: Vec<DocId> = ranked_hits.iter().map(|hit| hit.doc_id).collect();
        let mut sorted_ids = ranked_ids.clone();
        sorted_ids.sort_unstable();
        assert_eq!(boolean_hits, sorted_ids);
    }

    #[test]
    fn views_coexist() {
        let index = ingest(&["alpha beta", "beta gamma"]);
        let boolean = BooleanSearch::new(&index);
        let tfidf = TfIdf::new(&index);

        assert_eq!(boolean.term("beta"), vec![0, 1]);
        assert_eq!(tfidf.search(&["beta"], 10).len(), 2);
        assert_eq!(boolean.term("alpha"), vec![0]);
    }
}
