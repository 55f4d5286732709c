use crate::{DocId, Position};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Term -> set of documents containing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeSet<DocId>>,
    documents: BTreeSet<DocId>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub(crate) fn add_document(&mut self, doc_id: &str) {
        self.documents.insert(doc_id.to_string());
    }

    pub(crate) fn insert(&mut self, term: &str, doc_id: &str) {
        match self.postings.get_mut(term) {
            Some(docs) => {
                if !docs.contains(doc_id) {
                    docs.insert(doc_id.to_string());
                }
            }
            None => {
                self.postings.insert(term.to_string(), BTreeSet::from([doc_id.to_string()]));
            }
        }
    }

    pub fn postings(&self, term: &str) -> Option<&BTreeSet<DocId>> {
        self.postings.get(term)
    }

    /// Owned posting set; empty for an unknown term.
    pub fn docs_with_term(&self, term: &str) -> BTreeSet<DocId> {
        self.postings.get(term).cloned().unwrap_or_default()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    pub fn documents(&self) -> &BTreeSet<DocId> { &self.documents }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn num_docs(&self) -> usize { self.documents.len() }
}

/// Term -> document -> ascending positions in the filtered term stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalIndex {
    postings: HashMap<String, HashMap<DocId, Vec<Position>>>,
}

impl PositionalIndex {
    pub fn new() -> Self { Self::default() }

    /// Positions must be recorded in increasing order per (term, doc).
    pub(crate) fn record(&mut self, term: &str, doc_id: &str, pos: Position) {
        match self.postings.get_mut(term) {
            Some(docs) => match docs.get_mut(doc_id) {
                Some(list) => list.push(pos),
                None => {
                    docs.insert(doc_id.to_string(), vec![pos]);
                }
            },
            None => {
                let mut docs = HashMap::new();
                docs.insert(doc_id.to_string(), vec![pos]);
                self.postings.insert(term.to_string(), docs);
            }
        }
    }

    pub fn postings(&self, term: &str) -> Option<&HashMap<DocId, Vec<Position>>> {
        self.postings.get(term)
    }

    pub fn positions(&self, term: &str, doc_id: &str) -> &[Position] {
        self.postings
            .get(term)
            .and_then(|docs| docs.get(doc_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }
}

/// Both indexes, always derived from the same normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indexes {
    pub inverted: InvertedIndex,
    pub positional: PositionalIndex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_insert_is_a_no_op() {
        let mut ix = InvertedIndex::new();
        ix.insert("cat", "a.txt");
        ix.insert("cat", "a.txt");
        ix.insert("cat", "b.txt");
        assert_eq!(ix.postings("cat").map(|s| s.len()), Some(2));
        assert!(ix.docs_with_term("dog").is_empty());
    }

    #[test]
    fn positions_default_to_empty() {
        let mut ix = PositionalIndex::new();
        ix.record("cat", "a.txt", 0);
        ix.record("cat", "a.txt", 4);
        assert_eq!(ix.positions("cat", "a.txt"), &[0, 4]);
        assert!(ix.positions("cat", "b.txt").is_empty());
        assert!(ix.positions("dog", "a.txt").is_empty());
    }
}
