//! Text processing pipeline: tokenization → filtering → stemming or
//! lemmatization.
//!
//! The pipeline is the single normalization path for the whole engine: the
//! same configuration that prepares document text at ingestion prepares
//! query literals at search time, so a term always meets the index in the
//! same shape. It never fails; unusable input yields an empty term list.

use super::lemmatizer::Lemmatizer;
use super::stemmer;
use super::tokenizer::{Token, Tokenizer, TokenizerOptions};

/// Configuration for the text pipeline.
///
/// When both `use_stemming` and `use_lemmatization` are set, lemmatization
/// wins (it already falls back to the stemmer on dictionary misses).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Map `A–Z` to `a–z`.
    pub lower_case: bool,
    /// Drop punctuation tokens.
    pub skip_punctuation: bool,
    /// Drop number tokens.
    pub skip_numbers: bool,
    /// Discard word tokens shorter than this (bytes).
    pub min_token_len: usize,
    /// Discard word tokens longer than this (bytes).
    pub max_token_len: usize,
    /// Run the Porter stemmer over kept tokens.
    pub use_stemming: bool,
    /// Run the irregular-forms lemmatizer (with stemmer fallback) instead.
    pub use_lemmatization: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            lower_case: true,
            skip_punctuation: true,
            skip_numbers: true,
            min_token_len: 2,
            max_token_len: 100,
            use_stemming: true,
            use_lemmatization: false,
        }
    }
}

/// Deterministic text → terms transformation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPipeline {
    options: PipelineOptions,
    lemmatizer: Lemmatizer,
}

impl TextPipeline {
    /// Creates a pipeline with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline with the given options.
    pub fn with_options(options: PipelineOptions) -> Self {
        Self {
            options,
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Returns the active options.
    #[inline(always)]
    pub const fn options(&self) -> &PipelineOptions {
        &self.options
    }

    fn tokenizer(&self) -> Tokenizer {
        Tokenizer::with_options(TokenizerOptions {
            lower_case: self.options.lower_case,
            skip_whitespace: true,
            skip_punctuation: self.options.skip_punctuation,
            skip_numbers: self.options.skip_numbers,
            min_token_len: self.options.min_token_len,
            max_token_len: self.options.max_token_len,
        })
    }

    /// Tokenizes `text`, keeping source metadata. No stemming is applied.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenizer().tokenize(text)
    }

    /// Transforms `text` into the terms the index sees.
    pub fn process(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenizer().tokenize_to_strings(text);

        if self.options.use_lemmatization {
            return tokens
                .iter()
                .map(|token| self.lemmatizer.lemmatize(token))
                .collect();
        }
        if self.options.use_stemming {
            return tokens.iter().map(|token| stemmer::stem(token)).collect();
        }
        tokens
    }

    /// Normalizes a single already-isolated term through the same case and
    /// stem path used at ingestion. Idempotent.
    pub fn normalize_term(&self, term: &str) -> String {
        let term = if self.options.lower_case {
            term.to_ascii_lowercase()
        } else {
            term.to_string()
        };

        if self.options.use_lemmatization {
            return self.lemmatizer.lemmatize(&term);
        }
        if self.options.use_stemming {
            return stemmer::stem(&term);
        }
        term
    }

    /// Normalizes a batch of terms.
    pub fn normalize_terms<S: AsRef<str>>(&self, terms: &[S]) -> Vec<String> {
        terms
            .iter()
            .map(|term| self.normalize_term(term.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pipeline_stems() {
        let pipeline = TextPipeline::new();
        assert_eq!(
            pipeline.process("Running quickly through conditions"),
            vec!["run", "quickli", "through", "condit"]
        );
    }

    #[test]
    fn default_bounds_drop_single_chars() {
        let pipeline = TextPipeline::new();
        assert_eq!(pipeline.process("a b cd"), vec!["cd"]);
    }

    #[test]
    fn numbers_and_punctuation_dropped() {
        let pipeline = TextPipeline::new();
        assert_eq!(pipeline.process("python 3.12, tested!"), vec!["python", "test"]);
    }

    #[test]
    fn lemmatization_wins_when_both_set() {
        let pipeline = TextPipeline::with_options(PipelineOptions {
            use_stemming: true,
            use_lemmatization: true,
            ..Default::default()
        });
        assert_eq!(pipeline.process("children were better"), vec!["child", "be", "good"]);
    }

    #[test]
    fn raw_tokens_when_stemming_disabled() {
        let pipeline = TextPipeline::with_options(PipelineOptions {
            use_stemming: false,
            ..Default::default()
        });
        assert_eq!(pipeline.process("Running Fast"), vec!["running", "fast"]);
    }

    #[test]
    fn normalize_term_matches_ingestion() {
        let pipeline = TextPipeline::new();
        assert_eq!(pipeline.normalize_term("Relational"), "relat");
        assert_eq!(pipeline.normalize_term("PYTHON"), "python");
    }

    #[test]
    fn normalize_term_is_idempotent() {
        let pipeline = TextPipeline::new();
        for word in ["Running", "conditional", "apples", "easily", "x", ""] {
            let once = pipeline.normalize_term(word);
            assert_eq!(pipeline.normalize_term(&once), once, "word: {word}");
        }

        let lemma = TextPipeline::with_options(PipelineOptions {
            use_lemmatization: true,
            ..Default::default()
        });
        for word in ["children", "WERE", "better", "data"] {
            let once = lemma.normalize_term(word);
            assert_eq!(lemma.normalize_term(&once), once, "word: {word}");
        }
    }

    #[test]
    fn normalize_terms_batch() {
        let pipeline = TextPipeline::new();
        assert_eq!(
            pipeline.normalize_terms(&["Apples", "Bananas"]),
            vec!["appl", "banana"]
        );
    }

    #[test]
    fn empty_and_garbage_input() {
        let pipeline = TextPipeline::new();
        assert!(pipeline.process("").is_empty());
        assert!(pipeline.process("!!! ... ???").is_empty());
        assert!(pipeline.process("12 34 5.6").is_empty());
    }

    #[test]
    fn tokenize_keeps_metadata() {
        let pipeline = TextPipeline::new();
        let tokens = pipeline.tokenize("red apple");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].position, 4);
        assert_eq!(tokens[1].text, "apple");
    }
}
