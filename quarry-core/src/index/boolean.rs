//! Boolean retrieval: set algebra over posting lists.
//!
//! Supports `AND`, `OR`, `NOT` (complement against the universe of current
//! doc ids) and parentheses. Keywords match case-insensitively; every other
//! token in a query expression is a term literal and goes through the same
//! normalization path used at ingestion.
//!
//! The evaluator is tolerant by design: a malformed expression degrades to
//! an empty result, never an error. Unknown terms evaluate to empty posting
//! lists.
//!
//! All three merge algorithms rely on posting lists being strictly
//! ascending, which the index guarantees.

use smallvec::SmallVec;

use quarry_types::{DocId, PostingList};

use super::inverted::InvertedIndex;
use crate::analyzer::TextPipeline;

/// Boolean operator with its parsing properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("and") {
            Some(Self::And)
        } else if token.eq_ignore_ascii_case("or") {
            Some(Self::Or)
        } else if token.eq_ignore_ascii_case("not") {
            Some(Self::Not)
        } else {
            None
        }
    }

    const fn precedence(self) -> u8 {
        match self {
            Self::Not => 3,
            Self::And => 2,
            Self::Or => 1,
        }
    }

    const fn is_left_associative(self) -> bool {
        !matches!(self, Self::Not)
    }
}

/// A postfix-order query token.
#[derive(Debug, Clone, PartialEq, Eq)]
enum QueryToken {
    Term(String),
    Op(Operator),
}

/// Operator-stack entry during shunting-yard conversion.
#[derive(Debug, Clone, Copy)]
enum StackEntry {
    Op(Operator),
    Paren,
}

/// Splits a query on whitespace, with parentheses as standalone tokens.
fn lex(query: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in query.chars() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '(' | ')' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Shunting-yard conversion of an infix expression to postfix.
///
/// Term literals are normalized through `pipeline` as they are emitted.
/// Unbalanced parentheses are tolerated: a stray `)` closes nothing and a
/// missing one is closed at end of input.
fn to_postfix(query: &str, pipeline: &TextPipeline) -> Vec<QueryToken> {
    let mut output = Vec::new();
    let mut ops: SmallVec<[StackEntry; 8]> = SmallVec::new();

    for raw in lex(query) {
        if raw == "(" {
            ops.push(StackEntry::Paren);
            continue;
        }
        if raw == ")" {
            while let Some(entry) = ops.pop() {
                match entry {
                    StackEntry::Paren => break,
                    StackEntry::Op(op) => output.push(QueryToken::Op(op)),
                }
            }
            continue;
        }
        if let Some(op) = Operator::parse(&raw) {
            while let Some(StackEntry::Op(top)) = ops.last().copied() {
                if top.precedence() > op.precedence()
                    || (top.precedence() == op.precedence() && op.is_left_associative())
                {
                    ops.pop();
                    output.push(QueryToken::Op(top));
                } else {
                    break;
                }
            }
            ops.push(StackEntry::Op(op));
            continue;
        }
        output.push(QueryToken::Term(pipeline.normalize_term(&raw)));
    }

    while let Some(entry) = ops.pop() {
        if let StackEntry::Op(op) = entry {
            output.push(QueryToken::Op(op));
        }
    }
    output
}

/// Two-pointer intersection of ascending lists.
pub(crate) fn intersect(a: &[DocId], b: &[DocId]) -> PostingList {
    let mut result = PostingList::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }
    result
}

/// Two-pointer union of ascending lists; the result stays ascending and
/// duplicate-free.
pub(crate) fn union(a: &[DocId], b: &[DocId]) -> PostingList {
    let mut result = PostingList::with_capacity(a.len().max(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => {
                result.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                result.push(b[j]);
                j += 1;
            }
        }
    }
    result.extend_from_slice(&a[i..]);
    result.extend_from_slice(&b[j..]);
    result
}

/// Two-pointer difference `a \ b` of ascending lists.
fn difference(a: &[DocId], b: &[DocId]) -> PostingList {
    let mut result = PostingList::new();
    let mut j = 0;
    for &doc_id in a {
        while j < b.len() && b[j] < doc_id {
            j += 1;
        }
        if j >= b.len() || b[j] != doc_id {
            result.push(doc_id);
        }
    }
    result
}

/// Read-only Boolean query view over an inverted index.
#[derive(Debug, Clone, Copy)]
pub struct BooleanSearch<'a> {
    index: &'a InvertedIndex,
}

impl<'a> BooleanSearch<'a> {
    /// Creates a view over `index`.
    pub const fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    /// Owned posting list for a single term.
    pub fn term(&self, term: &str) -> PostingList {
        self.index.posting_list(term).to_vec()
    }

    /// Intersection of the posting lists of `terms`; empty for no terms.
    ///
    /// Terms are expected to be normalized already (the facade's
    /// convenience wrappers do that).
    pub fn and<S: AsRef<str>>(&self, terms: &[S]) -> PostingList {
        let Some((first, rest)) = terms.split_first() else {
            return PostingList::new();
        };

        let mut result = self.term(first.as_ref());
        for term in rest {
            result = intersect(&result, self.index.posting_list(term.as_ref()));
            if result.is_empty() {
                break;
            }
        }
        result
    }

    /// Union of the posting lists of `terms`.
    pub fn or<S: AsRef<str>>(&self, terms: &[S]) -> PostingList {
        let mut result = PostingList::new();
        for term in terms {
            result = union(&result, self.index.posting_list(term.as_ref()));
        }
        result
    }

    /// AND over `include`, minus every document containing any of `exclude`.
    pub fn and_not<S: AsRef<str>>(&self, include: &[S], exclude: &[S]) -> PostingList {
        let included = self.and(include);
        let mut excluded = PostingList::new();
        for term in exclude {
            excluded = union(&excluded, self.index.posting_list(term.as_ref()));
        }
        difference(&included, &excluded)
    }

    /// Evaluates a full Boolean expression.
    ///
    /// Term literals are normalized through `pipeline`. Missing operands
    /// degrade the result to empty; an empty expression is empty.
    pub fn query(&self, expression: &str, pipeline: &TextPipeline) -> PostingList {
        let postfix = to_postfix(expression, pipeline);
        let mut stack: SmallVec<[PostingList; 4]> = SmallVec::new();

        for token in postfix {
            match token {
                QueryToken::Term(term) => stack.push(self.term(&term)),
                QueryToken::Op(Operator::Not) => {
                    let Some(operand) = stack.pop() else {
                        return PostingList::new();
                    };
                    stack.push(self.complement(&operand));
                }
                QueryToken::Op(op) => {
                    let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                        return PostingList::new();
                    };
                    stack.push(match op {
                        Operator::And => intersect(&a, &b),
                        Operator::Or => union(&a, &b),
                        Operator::Not => unreachable!("handled above"),
                    });
                }
            }
        }

        stack.pop().unwrap_or_default()
    }

    /// Every current doc id not present in `list`.
    fn complement(&self, list: &[DocId]) -> PostingList {
        let mut result = PostingList::new();
        let mut i = 0;
        for doc_id in self.index.all_doc_ids() {
            if i < list.len() && list[i] == doc_id {
                i += 1;
            } else {
                result.push(doc_id);
            }
        }
        result
    }
}
