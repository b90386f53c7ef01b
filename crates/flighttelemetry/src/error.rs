//! Error types for flighttelemetry.
//!
//! The simulation itself cannot fail; every error here is either a storage
//! fault on the telemetry log or a problem loading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flighttelemetry operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// The telemetry log could not be created or truncated at startup.
    #[error("failed to initialize telemetry log at {path}: {source}")]
    TelemetryInit {
        /// Path to the telemetry log.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A record could not be appended to the telemetry log.
    #[error("failed to append to telemetry log at {path}: {source}")]
    TelemetryAppend {
        /// Path to the telemetry log.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the directory holding the telemetry log.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
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

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flighttelemetry operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error is a fault on the telemetry log.
    #[must_use]
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            Self::TelemetryInit { .. } | Self::TelemetryAppend { .. } | Self::DirectoryCreate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error(kind: std::io::ErrorKind) -> std::io::Error {
        std::io::Error::new(kind, "disk unhappy")
    }

    #[test]
    fn test_telemetry_init_display() {
        let err = Error::TelemetryInit {
            path: PathBuf::from("/readonly/telemetry.jsonl"),
            source: io_error(std::io::ErrorKind::PermissionDenied),
        };
        let msg = err.to_string();
        assert!(msg.contains("initialize"));
        assert!(msg.contains("/readonly/telemetry.jsonl"));
        assert!(msg.contains("disk unhappy"));
    }

    #[test]
    fn test_telemetry_append_display() {
        let err = Error::TelemetryAppend {
            path: PathBuf::from("telemetry.jsonl"),
            source: io_error(std::io::ErrorKind::Other),
        };
        assert!(err.to_string().contains("append"));
    }

    #[test]
    fn test_is_storage_fault() {
        let init = Error::TelemetryInit {
            path: PathBuf::from("a"),
            source: io_error(std::io::ErrorKind::NotFound),
        };
        let append = Error::TelemetryAppend {
            path: PathBuf::from("a"),
            source: io_error(std::io::ErrorKind::NotFound),
        };
        assert!(init.is_storage_fault());
        assert!(append.is_storage_fault());
        assert!(!Error::config_validation("nope").is_storage_fault());
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::config_validation("max_ticks must be greater than 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration: max_ticks must be greater than 0"
        );
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
    fn test_directory_create_error_display() {
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_error(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/root/forbidden"));
        assert!(err.is_storage_fault());
    }
}
