use crate::DocId;

/// Errors surfaced by indexing and ranking.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A query term could not be classified, e.g. a bare `-`.
    #[error("invalid query term {term:?}: {reason}")]
    InvalidQuery { term: String, reason: &'static str },
    /// The document id was already registered with this server.
    #[error("document {0} has already been added")]
    DuplicateDocument(DocId),
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, SearchError>;
