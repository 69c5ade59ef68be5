//! Pure functions for mapping errors to HTTP-style status codes.
//!
//! The resolver reports failures as `{ "status": <code> }`; these functions
//! pick the code for each error variant.

use crate::catalog::ValidationError;

use super::RepositoryError;

/// Maps a [`RepositoryError`] to a status code.
///
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - everything else -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use catalog_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::ConnectionFailed("dispatch failure".to_string());
/// assert_eq!(repository_error_to_status_code(&error), 503);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 500,
    }
}

/// Maps a [`ValidationError`] to a status code. Always 400 (Bad Request).
pub fn validation_error_to_status_code(_error: &ValidationError) -> u16 {
    400
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = RepositoryError::ConnectionFailed("dns error".to_string());
        assert_eq!(repository_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_query_failed_maps_to_500() {
        let error = RepositoryError::QueryFailed("Throughput exceeded".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_serialization_maps_to_500() {
        let error = RepositoryError::Serialization("not an object".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_invalid_data_maps_to_500() {
        let error = RepositoryError::InvalidData("binary attribute".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            validation_error_to_status_code(&ValidationError::MissingParent),
            400
        );
        let error = ValidationError::MissingKey {
            entity_type: "Taxonomy",
            field: "TaxonomyId",
        };
        assert_eq!(validation_error_to_status_code(&error), 400);
    }
}
