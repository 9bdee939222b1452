//! Error types for the vehicle registry.
//!
//! This module defines all error types used throughout the crate, providing
//! enough context to tell a corrupted store apart from a bad import or a
//! rejected form.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for registry operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// The persisted vehicle list could not be decoded.
    #[error("stored registry under key '{key}' is corrupted: {source}")]
    CorruptState {
        /// Storage key that holds the list.
        key: String,
        /// The decoding error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Registry Errors ===
    /// An import payload was rejected; the registry is untouched.
    #[error("invalid import file: {reason}")]
    InvalidImport {
        /// Why the payload was rejected.
        reason: String,
    },

    /// Submitted vehicle details failed field checks.
    #[error("invalid vehicle details: {}", .problems.join("; "))]
    InvalidInput {
        /// One message per failing field.
        problems: Vec<String>,
    },

    /// The admin password did not match.
    #[error("invalid admin password")]
    AdminAuth,

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A specialized Result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an import rejection error.
    #[must_use]
    pub fn invalid_import(reason: impl Into<String>) -> Self {
        Self::InvalidImport {
            reason: reason.into(),
        }
    }

    /// Check if this error left the registry untouched because of a bad import.
    #[must_use]
    pub fn is_invalid_import(&self) -> bool {
        matches!(self, Self::InvalidImport { .. })
    }

    /// Check if this error is a rejected admin password.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AdminAuth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::AdminAuth;
        assert_eq!(err.to_string(), "invalid admin password");

        let err = Error::invalid_import("top-level value is not an array");
        assert_eq!(
            err.to_string(),
            "invalid import file: top-level value is not an array"
        );
    }

    #[test]
    fn test_error_predicates() {
        assert!(Error::invalid_import("x").is_invalid_import());
        assert!(!Error::AdminAuth.is_invalid_import());
        assert!(Error::AdminAuth.is_auth_error());
    }

    #[test]
    fn test_invalid_input_lists_every_problem() {
        let err = Error::InvalidInput {
            problems: vec![
                "Model is required".to_string(),
                "Invalid email format".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid vehicle details: Model is required; Invalid email format"
        );
    }

    #[test]
    fn test_corrupt_state_names_key() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = Error::CorruptState {
            key: "vnr-parking-vehicles".to_string(),
            source,
        };
        assert!(err.to_string().contains("vnr-parking-vehicles"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "storage_key must not be empty".to_string(),
        };
        assert!(err.to_string().contains("storage_key"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
