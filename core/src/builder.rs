use crate::corpus::SourceDocument;
use crate::index::{Indexes, InvertedIndex, PositionalIndex};
use crate::tokenizer::Normalizer;
use crate::{DocId, Position};
use std::collections::HashSet;

/// Accumulates documents into an inverted and a positional index.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    inverted: InvertedIndex,
    positional: PositionalIndex,
    seen: HashSet<DocId>,
    skipped: usize,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    /// Index an already-normalized term sequence. Returns false (and indexes
    /// nothing) if `doc_id` was indexed before.
    pub fn add_terms(&mut self, doc_id: &str, terms: &[String]) -> bool {
        if !self.seen.insert(doc_id.to_string()) {
            tracing::warn!(doc_id, "duplicate document id, skipping");
            self.skipped += 1;
            return false;
        }
        self.inverted.add_document(doc_id);
        for (pos, term) in terms.iter().enumerate() {
            self.inverted.insert(term, doc_id);
            self.positional.record(term, doc_id, pos as Position);
        }
        true
    }

    /// Normalize a document once and feed both indexes from that pass.
    /// Unreadable documents are logged and skipped.
    pub fn add_document(&mut self, doc: &SourceDocument, normalizer: &Normalizer) -> bool {
        match &doc.content {
            Ok(text) => {
                let terms = normalizer.normalize(text);
                self.add_terms(&doc.id, &terms)
            }
            Err(e) => {
                tracing::warn!(doc_id = %doc.id, error = %e, "error reading document, skipping");
                self.skipped += 1;
                false
            }
        }
    }

    pub fn skipped(&self) -> usize { self.skipped }

    pub fn finish(self) -> Indexes {
        tracing::info!(
            num_docs = self.inverted.num_docs(),
            skipped = self.skipped,
            num_terms = self.inverted.num_terms(),
            "indexes built"
        );
        Indexes { inverted: self.inverted, positional: self.positional }
    }
}

/// Build both indexes over a document collection.
pub fn build_indexes<'a, I>(documents: I, normalizer: &Normalizer) -> Indexes
where
    I: IntoIterator<Item = &'a SourceDocument>,
{
    let mut builder = IndexBuilder::new();
    for doc in documents {
        builder.add_document(doc, normalizer);
    }
    builder.finish()
}
