//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Tokenizer**: splits raw text into word/number/punctuation tokens
//! - **Stemmer**: Porter (1980) affix stripping for English
//! - **Lemmatizer**: irregular-forms dictionary with stemmer fallback
//! - **Pipeline**: composes the above behind one configuration

mod irregular;
pub mod lemmatizer;
pub mod pipeline;
pub mod stemmer;
pub mod tokenizer;

pub use lemmatizer::Lemmatizer;
pub use pipeline::{PipelineOptions, TextPipeline};
pub use tokenizer::{Token, TokenKind, Tokenizer, TokenizerOptions};
