//! Error types for the driver
//!
//! Two kinds of failure live here. [`DatabaseError`] is returned as a Rust
//! error for problems the caller cannot work around (no session, bad
//! configuration, misuse of the nested-transaction contract). [`BackendError`]
//! is what a backend reports for a failed statement; the driver records it in
//! its last-error slot instead of returning it.

use serde::{Deserialize, Serialize};

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Error code and message reported by the backend for a failed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendError {
    pub code: i32,
    pub message: String,
}

impl BackendError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for BackendError {}

/// Error types for driver operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The native client returned no session handle
    #[error("Connection failed to {address} - {message}")]
    ConnectionFailed { address: String, message: String },

    /// Backend failure surfaced as a value
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Portable column type with no native equivalent
    #[error("Unmapped column type: {0}")]
    UnmappedType(String),

    /// Misuse of the nested transaction contract
    #[error("Transaction error: {0}")]
    TransactionError(String),

    /// Invalid driver configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unsupported operation
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration parse error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl DatabaseError {
    /// Create a connection failed error for the given address
    pub fn connection_failed(address: impl Into<String>, message: impl Into<String>) -> Self {
        DatabaseError::ConnectionFailed {
            address: address.into(),
            message: message.into(),
        }
    }

    /// Create a new transaction error
    pub fn transaction<S: Into<String>>(msg: S) -> Self {
        DatabaseError::TransactionError(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        DatabaseError::InvalidConfig(msg.into())
    }

    /// Create a new unsupported operation error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        DatabaseError::UnsupportedOperation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DatabaseError::connection_failed("db.local:1521", "no listener");
        assert!(matches!(err, DatabaseError::ConnectionFailed { .. }));

        let err = DatabaseError::transaction("commit at depth 0");
        assert!(matches!(err, DatabaseError::TransactionError(_)));

        let err: DatabaseError = BackendError::new(942, "table or view does not exist").into();
        assert!(matches!(err, DatabaseError::Backend(_)));
    }

    #[test]
    fn test_error_display() {
        let err = DatabaseError::connection_failed("db.local:1521", "refused");
        assert_eq!(
            err.to_string(),
            "Connection failed to db.local:1521 - refused"
        );

        let err = DatabaseError::UnmappedType("geometry".to_string());
        assert_eq!(err.to_string(), "Unmapped column type: geometry");

        let err = BackendError::new(1086, "savepoint 'SP3' never established");
        assert_eq!(err.to_string(), "[1086] savepoint 'SP3' never established");
    }
}
