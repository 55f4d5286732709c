use crate::boolean::BooleanQuery;
use crate::builder::build_indexes;
use crate::corpus::SourceDocument;
use crate::error::QueryError;
use crate::index::Indexes;
use crate::proximity::ProximityQuery;
use crate::tokenizer::Normalizer;
use crate::DocId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Boolean,
    Proximity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub kind: QueryKind,
    pub docs: BTreeSet<DocId>,
}

/// Indexes plus the normalizer that built them. Immutable once built; share
/// it behind an `Arc` to query from many threads.
#[derive(Debug, Clone)]
pub struct Engine {
    normalizer: Normalizer,
    indexes: Indexes,
}

impl Engine {
    pub fn build<'a, I>(documents: I, normalizer: Normalizer) -> Self
    where
        I: IntoIterator<Item = &'a SourceDocument>,
    {
        let indexes = build_indexes(documents, &normalizer);
        Self { normalizer, indexes }
    }

    pub fn indexes(&self) -> &Indexes { &self.indexes }

    pub fn normalizer(&self) -> &Normalizer { &self.normalizer }

    pub fn num_docs(&self) -> usize { self.indexes.inverted.num_docs() }

    pub fn num_terms(&self) -> usize { self.indexes.inverted.num_terms() }

    pub fn search(&self, raw_query: &str) -> Result<SearchOutcome, QueryError> {
        route(raw_query, &self.indexes, &self.normalizer)
    }
}

/// Any `/` in the raw query selects the proximity evaluator; everything else
/// is a boolean query.
pub fn route(raw_query: &str, indexes: &Indexes, normalizer: &Normalizer) -> Result<SearchOutcome, QueryError> {
    if raw_query.contains('/') {
        let query = ProximityQuery::parse(raw_query, normalizer)?;
        tracing::debug!(first = %query.first, second = %query.second, k = query.distance, "proximity query");
        let docs = query.evaluate(&indexes.positional);
        Ok(SearchOutcome { kind: QueryKind::Proximity, docs })
    } else {
        let query = BooleanQuery::parse(raw_query, normalizer);
        tracing::debug!(tokens = ?query.tokens(), "boolean query");
        let docs = query.evaluate(&indexes.inverted)?;
        Ok(SearchOutcome { kind: QueryKind::Boolean, docs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProximityParseError;

    fn engine() -> Engine {
        let docs = vec![
            SourceDocument::text("a.txt", "Data mining finds patterns in data."),
            SourceDocument::text("b.txt", "Mining companies dig. Data arrives much later in reports about data."),
        ];
        Engine::build(&docs, Normalizer::default())
    }

    #[test]
    fn routes_on_slash() {
        let e = engine();
        assert_eq!(e.search("data /1").unwrap_err(), QueryError::Proximity(ProximityParseError::OperandCount { found: 1 }));
        assert_eq!(e.search("data mining /1").unwrap().kind, QueryKind::Proximity);
        assert_eq!(e.search("data and mining").unwrap().kind, QueryKind::Boolean);
    }

    #[test]
    fn empty_query_is_empty_result() {
        let out = engine().search("").unwrap();
        assert_eq!(out.kind, QueryKind::Boolean);
        assert!(out.docs.is_empty());
    }
}
