//! Core types and errors for the quarry search engine.
//!
//! This crate provides the fundamental types that are shared across
//! the quarry ecosystem. Keeping types separate ensures:
//!
//! - **Small dependency surface**: consumers of results don't pull the engine
//! - **Cross-crate compatibility**: core and bindings share the same types
//! - **Clean boundaries**: no circular dependencies between crates

#![warn(missing_docs)]

use core::fmt;

/// Unique document identifier.
///
/// Documents are identified by a 32-bit unsigned integer assigned
/// sequentially from 0 at ingestion time. Identifiers are never reused
/// and never reordered.
pub type DocId = u32;

/// An ascending, duplicate-free sequence of document identifiers.
///
/// Every posting list in the engine upholds this invariant; the Boolean
/// merge algorithms rely on it.
pub type PostingList = Vec<DocId>;

/// Ranked search result containing a document ID and relevance score.
///
/// Results are ordered by score (descending), then by doc_id (ascending).
/// Higher scores indicate better matches.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit {
    /// Document identifier
    pub doc_id: DocId,
    /// Relevance score (higher is better)
    pub score: f64,
}

impl SearchHit {
    /// Creates a new search hit.
    #[inline(always)]
    pub const fn new(doc_id: DocId, score: f64) -> Self {
        Self { doc_id, score }
    }
}

impl PartialEq for SearchHit {
    fn eq(&self, other: &Self) -> bool {
        self.doc_id == other.doc_id && self.score == other.score
    }
}

impl Eq for SearchHit {}

impl PartialOrd for SearchHit {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchHit {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        // Primary: score (higher = greater for intuitive comparison)
        // Secondary: doc_id (deterministic ordering when scores are equal)
        match self.score.total_cmp(&other.score) {
            core::cmp::Ordering::Equal => self.doc_id.cmp(&other.doc_id),
            ord => ord,
        }
    }
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc={} score={:.4}", self.doc_id, self.score)
    }
}

/// Errors that can occur when decoding an LZW frame.
///
/// Compression is infallible; only the decoder can observe a malformed
/// stream. Callers that need a total function map these to empty output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A code referenced a dictionary slot that was never assigned.
    #[error("code {code} is outside the dictionary (next free: {next_code})")]
    CodeOutOfRange {
        /// The offending code.
        code: u16,
        /// The next dictionary slot that would have been assigned.
        next_code: u16,
    },
    /// A code equal to the next free slot arrived before any prefix existed.
    #[error("back-reference to an unassigned dictionary entry")]
    InvalidBackReference,
    /// The frame ended without the terminator code.
    #[error("compressed frame ended without the terminator code")]
    MissingTerminator,
}
