//! End-to-end scenarios driven through the public facade.

use quarry_core::analyzer::{lemmatizer, stemmer};
use quarry_core::{DatabaseOptions, Lzw, PipelineOptions, SearchDatabase};

#[test]
fn term_frequency_skew_ranks_heavier_document_first() {
    let mut db = SearchDatabase::new();
    db.add_document("python python python");
    db.add_document("python java cpp");
    db.add_document("cooking italian recipes");

    let hits = db.search("python", 10);

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].doc_id, 0);
    assert_eq!(hits[1].doc_id, 1);
    assert!(hits[0].score > hits[1].score);
    assert!(hits[1].score > 0.0);
}

#[test]
fn boolean_query_with_grouping_and_not() {
    let mut db = SearchDatabase::new();
    db.add_document("red apple");
    db.add_document("green apple");
    db.add_document("red banana");

    assert_eq!(db.boolean_query("(red OR green) AND NOT banana"), vec![0, 1]);
}

#[test]
fn learning_corpus_ties_on_matching_statistics() {
    let mut db = SearchDatabase::new();
    db.add_document("machine learning with python");
    db.add_document("deep learning neural networks");
    db.add_document("cooking italian recipes");

    let hits = db.search("learning", 10);

    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|hit| hit.score > 0.0));
    // Same normalized TF and document frequency on both sides: equal
    // scores, doc id breaks the tie.
    assert!((hits[0].score - hits[1].score).abs() < 1e-12);
    assert_eq!(hits[0].doc_id, 0);
    assert_eq!(hits[1].doc_id, 1);
}

#[test]
fn stemming_regressions() {
    assert_eq!(stemmer::stem("running"), "run");
    assert_eq!(stemmer::stem("easily"), "easili");
    assert_eq!(stemmer::stem("relational"), "relat");
    assert_eq!(stemmer::stem("conditional"), "condit");
    assert_eq!(stemmer::stem("hopping"), "hop");
    assert_eq!(stemmer::stem("hoping"), "hope");
}

#[test]
fn lemmatizer_regressions() {
    assert_eq!(lemmatizer::lemmatize("children"), "child");
    assert_eq!(lemmatizer::lemmatize("were"), "be");
    assert_eq!(lemmatizer::lemmatize("better"), "good");
    assert_eq!(lemmatizer::lemmatize("data"), "datum");
    assert_eq!(lemmatizer::lemmatize("running"), "run");
    // A regular word falls through to the stemmer.
    assert_eq!(lemmatizer::lemmatize("jumping"), "jump");
}

#[test]
fn lzw_roundtrip_with_compression_gain() {
    let input = "a".repeat(20_000);
    let codec = Lzw::new();

    let compressed = codec.compress(input.as_bytes());
    assert!(compressed.len() < input.len());
    assert_eq!(
        codec.decompress(&compressed).expect("valid frame"),
        input.as_bytes()
    );
}

#[test]
fn empty_index_boundaries() {
    let db = SearchDatabase::new();

    assert!(db.search("anything", 10).is_empty());
    assert!(db.boolean_query("NOT anything").is_empty());
    assert_eq!(db.doc_count(), 0);
    assert_eq!(db.term_count(), 0);
}

#[test]
fn conjunction_equals_intersection_of_single_queries() {
    let mut db = SearchDatabase::new();
    db.add_document("alpha beta gamma");
    db.add_document("alpha beta");
    db.add_document("beta gamma");
    db.add_document("alpha delta");

    let conjunction = db.boolean_query("alpha AND beta");
    let alpha = db.boolean_query("alpha");
    let beta = db.boolean_query("beta");

    let intersection: Vec<_> = alpha
        .iter()
        .copied()
        .filter(|doc_id| beta.contains(doc_id))
        .collect();
    assert_eq!(conjunction, intersection);
    assert!(conjunction.iter().all(|doc_id| alpha.contains(doc_id)));
    assert!(conjunction.iter().all(|doc_id| beta.contains(doc_id)));
}

#[test]
fn lemmatizing_database_unifies_irregular_forms() {
    let mut db = SearchDatabase::with_options(DatabaseOptions {
        pipeline: PipelineOptions {
            use_lemmatization: true,
            ..Default::default()
        },
        ..Default::default()
    });
    db.add_document("the children were running");
    db.add_document("a child runs");

    // Both documents collapse to the same base forms.
    assert_eq!(db.boolean_query("child"), vec![0, 1]);
    assert_eq!(db.boolean_query("children AND run"), vec![0, 1]);
}

#[test]
fn document_roundtrip_matches_ingested_text() {
    let mut db = SearchDatabase::new();
    let bodies = [
        "First document body, compressed behind the scenes.",
        "Second document body with plenty of repetition, repetition, repetition.",
    ];
    for body in bodies {
        db.add_document(body);
    }

    for (doc_id, body) in bodies.iter().enumerate() {
        assert_eq!(db.get_document(doc_id as u32).as_deref(), Some(*body));
    }

    db.clear();
    assert_eq!(db.get_document(0), None);
}
