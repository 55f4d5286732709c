use crate::boolean::Operator;
use crate::DocId;

/// A document whose content could not be turned into text. Indexing skips it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentReadError {
    #[error("failed to read document {id}: {message}")]
    Io { id: DocId, message: String },
    #[error("document {id} is not valid UTF-8 text")]
    InvalidUtf8 { id: DocId },
}

/// Structural problems in a `term1 term2 /k` query.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProximityParseError {
    #[error("proximity query is missing the `/k` distance")]
    MissingDistance,
    #[error("proximity query may contain only one `/`")]
    ExtraSlash,
    #[error("proximity query needs exactly two terms before `/`, found {found}")]
    OperandCount { found: usize },
    #[error("proximity distance `{value}` is not a non-negative integer")]
    InvalidDistance { value: String },
}

/// Query-time failures. These are surfaced to the caller and never collapse
/// into an empty result.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("malformed proximity query: {0}")]
    Proximity(#[from] ProximityParseError),
    #[error("operator `{operator}` has no following operand")]
    DanglingOperator { operator: Operator },
    #[error("operator `{operator}` at token {position} cannot follow another operator")]
    MisplacedOperator { operator: Operator, position: usize },
}
