//! Storage error types.

use thiserror::Error;

use imgvault_shared::AppError;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// Credentials rejected or bucket not accessible.
    #[error("storage permission denied: {0}")]
    PermissionDenied(String),

    /// Object or bucket not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// OpenDAL operation error.
    #[error("storage operation failed: {0}")]
    Operation(String),

    /// Invalid storage key.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

impl StorageError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an operation error.
    #[must_use]
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::ConfigInvalid => Self::Configuration(err.to_string()),
            opendal::ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            opendal::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::Operation(err.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Configuration(_) => Self::Configuration(err.to_string()),
            StorageError::InvalidKey(_) => Self::BadRequest(err.to_string()),
            _ => Self::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use opendal::ErrorKind;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ErrorKind::ConfigInvalid, "configuration")]
    #[case(ErrorKind::PermissionDenied, "permission_denied")]
    #[case(ErrorKind::NotFound, "not_found")]
    #[case(ErrorKind::Unexpected, "operation")]
    fn test_from_opendal_error(#[case] kind: ErrorKind, #[case] expected: &str) {
        let err = StorageError::from(opendal::Error::new(kind, "boom"));
        let actual = match err {
            StorageError::Configuration(_) => "configuration",
            StorageError::PermissionDenied(_) => "permission_denied",
            StorageError::NotFound(_) => "not_found",
            StorageError::Operation(_) => "operation",
            StorageError::InvalidKey(_) => "invalid_key",
        };
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = StorageError::operation("connection reset").into();
        assert!(matches!(app, AppError::Storage(_)));
        assert_eq!(app.status_code(), 500);

        let app: AppError = StorageError::configuration("missing bucket").into();
        assert!(matches!(app, AppError::Configuration(_)));
        assert_eq!(app.status_code(), 500);

        let app: AppError = StorageError::InvalidKey("key must not end with '/'".into()).into();
        assert!(matches!(app, AppError::BadRequest(_)));
        assert_eq!(app.status_code(), 400);
    }
}
