//! Left-to-right boolean queries over the inverted index.
//!
//! There is no precedence: `a and b or c` is `(a AND b) OR c`, and
//! `a or c and b` is `(a OR c) AND b`. Adjacent terms with no operator between
//! them are intersected.

use crate::error::QueryError;
use crate::index::InvertedIndex;
use crate::tokenizer::Normalizer;
use crate::DocId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            w if w.eq_ignore_ascii_case("and") => Some(Operator::And),
            w if w.eq_ignore_ascii_case("or") => Some(Operator::Or),
            w if w.eq_ignore_ascii_case("not") => Some(Operator::Not),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryToken {
    Term(String),
    Op(Operator),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanQuery {
    tokens: Vec<QueryToken>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectTerm,
    AfterAnd,
    AfterOr,
    NegatePending,
}

impl BooleanQuery {
    pub fn new(tokens: Vec<QueryToken>) -> Self { Self { tokens } }

    /// Lex a raw query. Operator words are recognised before normalization so
    /// stopword lists cannot swallow them; every other word is normalized and
    /// may yield zero or more terms.
    pub fn parse(raw: &str, normalizer: &Normalizer) -> Self {
        let mut tokens = Vec::new();
        for word in raw.split_whitespace() {
            match Operator::from_word(word) {
                Some(op) => tokens.push(QueryToken::Op(op)),
                None => tokens.extend(normalizer.normalize(word).into_iter().map(QueryToken::Term)),
            }
        }
        Self { tokens }
    }

    /// Read an already-normalized term stream where the literal strings
    /// `and`, `or` and `not` are operators.
    pub fn from_terms<S: AsRef<str>>(terms: &[S]) -> Self {
        let tokens = terms
            .iter()
            .map(|t| {
                let t = t.as_ref();
                match t {
                    "and" => QueryToken::Op(Operator::And),
                    "or" => QueryToken::Op(Operator::Or),
                    "not" => QueryToken::Op(Operator::Not),
                    _ => QueryToken::Term(t.to_string()),
                }
            })
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[QueryToken] { &self.tokens }

    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    /// Evaluate in a single pass. Unknown terms match nothing; an empty query
    /// matches nothing.
    pub fn evaluate(&self, index: &InvertedIndex) -> Result<BTreeSet<DocId>, QueryError> {
        let mut result: Option<BTreeSet<DocId>> = None;
        let mut state = State::ExpectTerm;
        let mut last_op = Operator::And;

        for (position, token) in self.tokens.iter().enumerate() {
            state = match (state, token) {
                (State::ExpectTerm, QueryToken::Term(t)) | (State::AfterAnd, QueryToken::Term(t)) => {
                    let docs = index.docs_with_term(t);
                    result = Some(match result.take() {
                        Some(r) => r.intersection(&docs).cloned().collect(),
                        None => docs,
                    });
                    State::ExpectTerm
                }
                (State::AfterOr, QueryToken::Term(t)) => {
                    let mut docs = index.docs_with_term(t);
                    if let Some(r) = result.take() {
                        docs.extend(r);
                    }
                    result = Some(docs);
                    State::ExpectTerm
                }
                (State::NegatePending, QueryToken::Term(t)) => {
                    let mut r = result.take().unwrap_or_default();
                    if let Some(docs) = index.postings(t) {
                        r.retain(|d| !docs.contains(d));
                    }
                    result = Some(r);
                    State::ExpectTerm
                }
                (State::ExpectTerm, QueryToken::Op(op)) => {
                    last_op = *op;
                    match op {
                        Operator::And => State::AfterAnd,
                        Operator::Or => State::AfterOr,
                        Operator::Not => State::NegatePending,
                    }
                }
                (State::AfterAnd, QueryToken::Op(Operator::Not)) => {
                    last_op = Operator::Not;
                    State::NegatePending
                }
                (_, QueryToken::Op(op)) => {
                    return Err(QueryError::MisplacedOperator { operator: *op, position });
                }
            };
        }

        if state != State::ExpectTerm {
            return Err(QueryError::DanglingOperator { operator: last_op });
        }
        Ok(result.unwrap_or_default())
    }
}
