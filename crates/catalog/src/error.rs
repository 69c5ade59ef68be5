use catalog_core::catalog::ValidationError;
use catalog_core::storage::{
    repository_error_to_status_code, validation_error_to_status_code, RepositoryError,
};
use thiserror::Error;

/// Failure of a single table operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl OperationError {
    /// Status code reported to the invoker when the failure is surfaced.
    pub fn status_code(&self) -> u16 {
        match self {
            OperationError::Validation(e) => validation_error_to_status_code(e),
            OperationError::Storage(e) => repository_error_to_status_code(e),
        }
    }

    /// Storage failures are subject to the failure policy; validation ones are not.
    pub fn is_storage(&self) -> bool {
        matches!(self, OperationError::Storage(_))
    }
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, OperationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_status_code() {
        let error: OperationError = ValidationError::MissingParent.into();
        assert_eq!(error.status_code(), 400);
        assert!(!error.is_storage());
    }

    #[test]
    fn test_storage_status_code() {
        let error: OperationError = RepositoryError::ConnectionFailed("timeout".into()).into();
        assert_eq!(error.status_code(), 503);
        assert!(error.is_storage());
    }

    #[test]
    fn test_display_is_transparent() {
        let error: OperationError = RepositoryError::QueryFailed("Table not found".into()).into();
        assert_eq!(error.to_string(), "Query failed: Table not found");
    }
}
