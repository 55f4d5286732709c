pub mod boolean;
pub mod builder;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod proximity;
pub mod segment;
pub mod tokenizer;

/// Stable external identifier of a document (its file name).
pub type DocId = String;
/// 0-based ordinal of a term in a document's filtered term stream.
pub type Position = u32;

pub use boolean::{BooleanQuery, Operator, QueryToken};
pub use builder::{build_indexes, IndexBuilder};
pub use corpus::{CorpusConfig, SourceDocument};
pub use engine::{route, Engine, QueryKind, SearchOutcome};
pub use error::{DocumentReadError, ProximityParseError, QueryError};
pub use index::{Indexes, InvertedIndex, PositionalIndex};
pub use proximity::ProximityQuery;
pub use segment::Segmenter;
pub use tokenizer::{normalize, Normalizer};
