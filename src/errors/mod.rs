//! Error handling utilities for the momento application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! The statistics and achievement engine itself never fails; everything here
//! belongs to the collaborators around it (storage, photos, locking, config).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur when attempting to lock the data directory.
///
/// # Examples
///
/// ```
/// use momento::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::FileBusy {
///     path: PathBuf::from("/path/to/momento.lock"),
/// };
///
/// assert!(format!("{}", error).contains("another momento process"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Error when the lock is already held by another process.
    #[error("Data directory is in use by another momento process: {path}. Please wait for it to finish and try again.")]
    FileBusy {
        /// The path to the lock file
        path: PathBuf,
    },

    /// Error when acquiring the lock fails for a technical reason.
    #[error("Failed to acquire lock {path}: {source}. Please check file permissions and ensure the directory is accessible.")]
    AcquisitionFailed {
        /// The path to the lock file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use momento::errors::DatabaseError;
///
/// let error = DatabaseError::Custom("kv store unavailable".to_string());
/// assert!(format!("{}", error).contains("kv store unavailable"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other momento instances.")]
    Pool(#[from] r2d2::Error),

    /// Custom database error with detailed message.
    #[error("Database error: {0}")]
    Custom(String),
}

/// Represents errors from the local photo store.
///
/// Deleting photos never produces one of these; delete failures are logged
/// and swallowed so they cannot block removing a moment.
#[derive(Debug, Error)]
pub enum PhotoError {
    /// The file to import does not exist.
    #[error("Source file does not exist: {path}")]
    SourceMissing {
        /// Path that was requested
        path: PathBuf,
    },

    /// Copying the file into the photo directory failed.
    #[error("Failed to store photo {path}: {source}")]
    CopyFailed {
        /// Path that was being imported
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can occur in the momento application.
///
/// # Examples
///
/// ```
/// use momento::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid moment input or unknown moment id.
    #[error("Moment error: {0}")]
    Moment(String),

    /// Errors related to the key-value database.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Stored or outgoing JSON could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors related to the data directory lock.
    #[error("File locking error: {0}")]
    Lock(#[from] LockError),

    /// Errors from the photo store.
    #[error("Photo error: {0}")]
    Photo(#[from] PhotoError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use momento::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Moment("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let app_io_error = AppError::Io(io_error);
        assert_eq!(format!("{}", app_io_error), "I/O error: permission denied");

        let moment_error = AppError::Moment("Title cannot be empty".to_string());
        assert_eq!(
            format!("{}", moment_error),
            "Moment error: Title cannot be empty"
        );

        let lock_error = LockError::FileBusy {
            path: PathBuf::from("/data/momento.lock"),
        };
        let app_error = AppError::Lock(lock_error);
        assert!(format!("{}", app_error).contains("File locking error"));
        assert!(format!("{}", app_error).contains("/data/momento.lock"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<Vec<String>>("{not json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::Serialization(_)));
        assert!(format!("{}", app_error).starts_with("Serialization error"));
    }

    #[test]
    fn test_photo_error_variants() {
        let error = PhotoError::SourceMissing {
            path: PathBuf::from("/tmp/missing.jpg"),
        };
        assert!(format!("{}", error).contains("does not exist"));
        assert!(format!("{}", error).contains("/tmp/missing.jpg"));

        let error = PhotoError::CopyFailed {
            path: PathBuf::from("/tmp/a.jpg"),
            source: io::Error::other("disk full"),
        };
        let app_error: AppError = error.into();
        assert!(format!("{}", app_error).contains("Photo error"));
        assert!(format!("{}", app_error).contains("disk full"));
    }

    #[test]
    fn test_lock_error_conversion_to_app_error() {
        let lock_error = LockError::FileBusy {
            path: PathBuf::from("/path/to/momento.lock"),
        };

        let app_error: AppError = lock_error.into();

        match app_error {
            AppError::Lock(LockError::FileBusy { path }) => {
                assert_eq!(path, PathBuf::from("/path/to/momento.lock"));
            }
            _ => panic!("Expected AppError::Lock(FileBusy) variant"),
        }
    }

    #[test]
    fn test_result_combinators() {
        let io_result: Result<(), io::Error> = Err(io::Error::other("test error"));
        let app_result: AppResult<()> = io_result.map_err(AppError::Io);

        match app_result {
            Err(AppError::Io(inner)) => {
                assert_eq!(inner.kind(), io::ErrorKind::Other);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }
}
