//! quarry: an embedded in-memory text search engine.
//!
//! Given a stream of textual documents, quarry builds an inverted index,
//! answers Boolean queries (`AND`/`OR`/`NOT` with parentheses) against that
//! index, and ranks documents against free-form queries by TF-IDF.
//! Documents may optionally be stored back in LZW-compressed form so the
//! engine can return the original text by identifier.
//!
//! Layers, leaves first:
//! - [`lzw`]: 12-bit variable-dictionary codec for stored bodies
//! - [`analyzer`]: tokenization → case folding → filtering → Porter
//!   stemming or irregular-forms lemmatization
//! - [`index`]: posting lists, Boolean retrieval, TF-IDF ranking
//! - [`database`]: the facade composing everything
//! - [`ffi`]: C-compatible handle API over the facade
//!
//! Threading: the engine is single-threaded by design. A
//! [`SearchDatabase`] is mutated only by its `add_*` methods and `clear`;
//! all other operations are pure readers and may run side by side once
//! writing is done.
//!
//! ```
//! use quarry_core::SearchDatabase;
//!
//! let mut db = SearchDatabase::new();
//! db.add_document("machine learning with python");
//! db.add_document("cooking italian recipes");
//!
//! let hits = db.search("learning", 10);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].doc_id, 0);
//!
//! assert_eq!(db.boolean_query("python AND NOT cooking"), vec![0]);
//! ```

pub mod analyzer;
pub mod database;
pub mod ffi;
pub mod index;
pub mod lzw;

pub use analyzer::{PipelineOptions, TextPipeline};
pub use database::{DatabaseOptions, SearchDatabase};
pub use index::{BooleanSearch, InvertedIndex, TfIdf};
pub use lzw::{Lzw, LzwOptions};
pub use quarry_types::{CodecError, DocId, PostingList, SearchHit};
