use thiserror::Error;

/// Errors raised before a request reaches storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{entity_type} requires {field}")]
    MissingKey {
        entity_type: &'static str,
        field: &'static str,
    },
    #[error("Taxonomy lookup by parent requires ParentId")]
    MissingParent,
    #[error("Malformed arguments: {0}")]
    MalformedArguments(String),
}
