//! Byte-class Tokenizer Module
//!
//! This module provides the first stage of the text processing pipeline: a
//! single forward scan that splits raw text into word, number, whitespace,
//! and punctuation tokens, each carrying its byte position in the source.
//!
//! ## What It Does
//!
//! Given input like `"Hello, world 42"`, it emits (with default options):
//!
//! ```ignore
//! Token { text: "hello", position: 0, length: 5 }
//! Token { text: "world", position: 7, length: 5 }
//! ```
//!
//! The comma is a punctuation token and `42` is a number token; both are
//! dropped by default and can be kept by flipping the skip flags.
//!
//! ## Classification
//!
//! A token's class is decided by its first character:
//!
//! - **Word**: starts with an ASCII letter; continues over letters, digits,
//!   `_`, and `-`
//! - **Number**: starts with an ASCII digit; continues over digits, `.`, `,`
//! - **Whitespace**: space, tab, CR, LF; consumed as a run
//! - **Punctuation**: anything else, one character per token
//!
//! Word tokens are case-folded when `lower_case` is set and then filtered by
//! the length bounds. Number and punctuation tokens bypass the bounds; their
//! skip flags alone decide whether they appear in the output.
//!
//! Non-ASCII characters do not start words or numbers; each one is emitted
//! as an opaque punctuation token so that the scanner never fails on
//! arbitrary input.

/// Lexical class of a token, decided by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// ASCII letter followed by letters, digits, `_`, or `-`.
    Word,
    /// ASCII digit followed by digits, `.`, or `,`.
    Number,
    /// A run of space, tab, CR, or LF.
    Whitespace,
    /// Any other single character.
    Punctuation,
}

/// A token with its location in the source text.
///
/// `position` and `length` are byte offsets into the original input; they
/// are carried as metadata only and are never indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text, case-folded if the tokenizer was configured to do so.
    pub text: String,
    /// Byte offset of the token in the source.
    pub position: usize,
    /// Byte length of the source span.
    pub length: usize,
}

impl Token {
    /// Creates a new token.
    #[inline]
    pub fn new(text: impl Into<String>, position: usize, length: usize) -> Self {
        Self {
            text: text.into(),
            position,
            length,
        }
    }
}

/// Configuration options for tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Map `A–Z` to `a–z` in word tokens.
    pub lower_case: bool,
    /// Drop whitespace runs from the output.
    pub skip_whitespace: bool,
    /// Drop punctuation tokens from the output.
    pub skip_punctuation: bool,
    /// Drop number tokens from the output.
    pub skip_numbers: bool,
    /// Discard word tokens shorter than this (bytes).
    pub min_token_len: usize,
    /// Discard word tokens longer than this (bytes).
    pub max_token_len: usize,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            lower_case: true,
            skip_whitespace: true,
            skip_punctuation: true,
            skip_numbers: true,
            min_token_len: 1,
            max_token_len: 1000,
        }
    }
}

/// Single-pass text tokenizer.
///
/// Scans the input left to right exactly once, classifying each token by its
/// first character. The scanner is total: any input produces a (possibly
/// empty) token list, never an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    options: TokenizerOptions,
}

impl Tokenizer {
    /// Creates a tokenizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tokenizer with the given options.
    pub const fn with_options(options: TokenizerOptions) -> Self {
        Self { options }
    }

    /// Returns the active options.
    #[inline(always)]
    pub const fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Tokenizes `text` into tokens with source metadata.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let bytes = text.as_bytes();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let start = pos;
            match classify(bytes[pos]) {
                TokenKind::Whitespace => {
                    while pos < bytes.len() && is_whitespace(bytes[pos]) {
                        pos += 1;
                    }
                    if !self.options.skip_whitespace {
                        tokens.push(Token::new(&text[start..pos], start, pos - start));
                    }
                }
                TokenKind::Word => {
                    pos += 1;
                    while pos < bytes.len() && is_word_byte(bytes[pos]) {
                        pos += 1;
                    }
                    let mut word = text[start..pos].to_string();
                    if self.options.lower_case {
                        word.make_ascii_lowercase();
                    }
                    if word.len() >= self.options.min_token_len
                        && word.len() <= self.options.max_token_len
                    {
                        tokens.push(Token::new(word, start, pos - start));
                    }
                }
                TokenKind::Number => {
                    pos += 1;
                    while pos < bytes.len() && is_number_byte(bytes[pos]) {
                        pos += 1;
                    }
                    if !self.options.skip_numbers {
                        tokens.push(Token::new(&text[start..pos], start, pos - start));
                    }
                }
                TokenKind::Punctuation => {
                    // One character per token; non-ASCII advances by the full
                    // UTF-8 sequence so the scan stays on char boundaries.
                    pos += utf8_width(bytes[pos]).min(bytes.len() - pos);
                    if !self.options.skip_punctuation {
                        tokens.push(Token::new(&text[start..pos], start, pos - start));
                    }
                }
            }
        }

        tokens
    }

    /// Tokenizes `text` and returns only the token texts.
    pub fn tokenize_to_strings(&self, text: &str) -> Vec<String> {
        self.tokenize(text)
            .into_iter()
            .map(|token| token.text)
            .collect()
    }
}

#[inline(always)]
const fn is_ascii_alpha(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_uppercase()
}

#[inline(always)]
const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline(always)]
const fn is_word_byte(b: u8) -> bool {
    is_ascii_alpha(b) || b.is_ascii_digit() || b == b'_' || b == b'-'
}

#[inline(always)]
const fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.' || b == b','
}

#[inline(always)]
const fn classify(b: u8) -> TokenKind {
    if is_ascii_alpha(b) {
        TokenKind::Word
    } else if b.is_ascii_digit() {
        TokenKind::Number
    } else if is_whitespace(b) {
        TokenKind::Whitespace
    } else {
        TokenKind::Punctuation
    }
}

/// Width in bytes of the UTF-8 sequence starting with `lead`.
#[inline(always)]
const fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xFF => 4,
        // Continuation byte; cannot start a char in valid UTF-8.
        _ => 1,
    }
}
