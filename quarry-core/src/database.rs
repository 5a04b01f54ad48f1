//! Search database facade.
//!
//! Composes the text pipeline, inverted index, Boolean evaluator, TF-IDF
//! ranker, and LZW codec behind one owner. The database is the single
//! writer: posting lists, frequency tables, and the document store are
//! mutated only by the `add_*` methods and `clear`; every other operation
//! is a pure reader over that state.
//!
//! Document bodies are optionally retained for later retrieval, either raw
//! or LZW-compressed; titles are kept in a separate map. All retrieval
//! operations are total — unknown identifiers and unmatched queries produce
//! `None`/empty results, never errors.

use std::collections::HashMap;

use quarry_types::{DocId, PostingList, SearchHit};

use crate::analyzer::{PipelineOptions, TextPipeline};
use crate::index::{BooleanSearch, InvertedIndex, TfIdf};
use crate::lzw::Lzw;

/// Facade configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseOptions {
    /// Passed verbatim to the text pipeline.
    pub pipeline: PipelineOptions,
    /// Retain document bodies for later retrieval.
    pub store_documents: bool,
    /// If storing, store LZW-compressed rather than raw.
    pub compress_documents: bool,
    /// Retain per-document titles.
    pub store_titles: bool,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            pipeline: PipelineOptions::default(),
            store_documents: true,
            compress_documents: true,
            store_titles: true,
        }
    }
}

/// In-memory document database with Boolean and ranked search.
#[derive(Debug, Default)]
pub struct SearchDatabase {
    options: DatabaseOptions,
    pipeline: TextPipeline,
    index: InvertedIndex,
    codec: Lzw,
    raw_docs: HashMap<DocId, String>,
    compressed_docs: HashMap<DocId, Vec<u8>>,
    titles: HashMap<DocId, String>,
}

impl SearchDatabase {
    /// Creates a database with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a database with the given options.
    pub fn with_options(options: DatabaseOptions) -> Self {
        Self {
            options,
            pipeline: TextPipeline::with_options(options.pipeline),
            ..Self::default()
        }
    }

    /// Returns the active options.
    #[inline(always)]
    pub const fn options(&self) -> &DatabaseOptions {
        &self.options
    }

    /// Read access to the underlying index.
    #[inline(always)]
    pub const fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// The normalization pipeline shared by ingestion and queries.
    #[inline(always)]
    pub const fn pipeline(&self) -> &TextPipeline {
        &self.pipeline
    }

    /// Indexes `content` and returns the new document's identifier.
    pub fn add_document(&mut self, content: &str) -> DocId {
        self.add_document_with_title(content, "")
    }

    /// Indexes `content` with a title. Empty titles are not stored.
    pub fn add_document_with_title(&mut self, content: &str, title: &str) -> DocId {
        let terms = self.pipeline.process(content);
        let doc_id = self.index.add_document(terms);

        if self.options.store_documents {
            self.store_body(doc_id, content);
        }
        if self.options.store_titles && !title.is_empty() {
            self.titles.insert(doc_id, title.to_string());
        }
        tracing::debug!(doc_id, terms = self.index.doc_len(doc_id), "indexed document");
        doc_id
    }

    /// Indexes a pre-tokenized term stream. The terms are taken as-is; no
    /// normalization is applied.
    pub fn add_document_terms<I, S>(&mut self, terms: I) -> DocId
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doc_id = self.index.add_document(terms);
        tracing::debug!(doc_id, terms = self.index.doc_len(doc_id), "indexed document");
        doc_id
    }

    /// Indexes a pre-tokenized term stream and persists `body` tagged to the
    /// returned identifier (when document storage is enabled).
    pub fn add_document_terms_with_body<I, S>(&mut self, terms: I, body: &str) -> DocId
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doc_id = self.add_document_terms(terms);
        if self.options.store_documents {
            self.store_body(doc_id, body);
        }
        doc_id
    }

    /// Ranks documents against a free-form query by TF-IDF.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        let terms = self.pipeline.process(query);
        tracing::trace!(top_k, query_terms = terms.len(), "ranked search");
        TfIdf::new(&self.index).search(&terms, top_k)
    }

    /// Ranks documents against already-normalized query terms.
    pub fn search_terms<S: AsRef<str>>(&self, terms: &[S], top_k: usize) -> Vec<SearchHit> {
        TfIdf::new(&self.index).search(terms, top_k)
    }

    /// Documents containing every one of `terms` (normalized first).
    pub fn boolean_and<S: AsRef<str>>(&self, terms: &[S]) -> PostingList {
        let normalized = self.pipeline.normalize_terms(terms);
        BooleanSearch::new(&self.index).and(&normalized)
    }

    /// Documents containing any of `terms` (normalized first).
    pub fn boolean_or<S: AsRef<str>>(&self, terms: &[S]) -> PostingList {
        let normalized = self.pipeline.normalize_terms(terms);
        BooleanSearch::new(&self.index).or(&normalized)
    }

    /// Documents matching all of `include` and none of `exclude`.
    pub fn boolean_and_not<S: AsRef<str>>(&self, include: &[S], exclude: &[S]) -> PostingList {
        let include = self.pipeline.normalize_terms(include);
        let exclude = self.pipeline.normalize_terms(exclude);
        BooleanSearch::new(&self.index).and_not(&include, &exclude)
    }

    /// Evaluates a Boolean expression (`AND`/`OR`/`NOT`, parentheses).
    pub fn boolean_query(&self, expression: &str) -> PostingList {
        BooleanSearch::new(&self.index).query(expression, &self.pipeline)
    }

    /// Returns the stored body of a document, decompressing if needed.
    ///
    /// `None` when storage is disabled, the identifier is unknown, or the
    /// stored frame fails to decode.
    pub fn get_document(&self, doc_id: DocId) -> Option<String> {
        if !self.options.store_documents {
            return None;
        }
        if self.options.compress_documents {
            let frame = self.compressed_docs.get(&doc_id)?;
            let bytes = self.codec.decompress(frame).ok()?;
            return String::from_utf8(bytes).ok();
        }
        self.raw_docs.get(&doc_id).cloned()
    }

    /// Returns the stored title of a document, if any.
    pub fn get_title(&self, doc_id: DocId) -> Option<&str> {
        if !self.options.store_titles {
            return None;
        }
        self.titles.get(&doc_id).map(String::as_str)
    }

    /// Number of indexed documents.
    #[inline]
    pub fn doc_count(&self) -> usize {
        self.index.doc_count()
    }

    /// Number of distinct indexed terms.
    #[inline]
    pub fn term_count(&self) -> usize {
        self.index.term_count()
    }

    /// Drops every document, term, body, and title.
    pub fn clear(&mut self) {
        self.index.clear();
        self.raw_docs.clear();
        self.compressed_docs.clear();
        self.titles.clear();
        tracing::debug!("database cleared");
    }

    fn store_body(&mut self, doc_id: DocId, body: &str) {
        if self.options.compress_documents {
            self.compressed_docs
                .insert(doc_id, self.codec.compress(body.as_bytes()));
        } else {
            self.raw_docs.insert(doc_id, body.to_string());
        }
    }
}
