//! Protocol-specific error types
//!
//! This module defines error types for the XML-RPC client.

use thiserror::Error;

/// Result type alias for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Protocol-specific error types
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// HTTP transport error (connect, timeout, body read)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status
    #[error("Service answered with HTTP status {status}")]
    HttpStatus { status: u16 },

    /// The service returned an XML-RPC fault
    #[error("XML-RPC fault {code}: {message}")]
    Fault { code: i64, message: String },

    /// A call was answered with a non-success status text
    #[error("Service returned status: {status}")]
    Status { status: String },

    /// Encoding error
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    /// Response body is not a well-formed XML-RPC document
    #[error("Decoding error: {message}")]
    Decoding { message: String },

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid response format
    #[error("Invalid response format: expected {expected}, got {actual}")]
    InvalidResponse { expected: String, actual: String },
}

impl ProtocolError {
    /// Create an HTTP status error
    pub fn http_status(status: u16) -> Self {
        Self::HttpStatus { status }
    }

    /// Create a fault error
    pub fn fault(code: i64, message: impl Into<String>) -> Self {
        Self::Fault {
            code,
            message: message.into(),
        }
    }

    /// Create a status error carrying the literal status text
    pub fn status(status: impl Into<String>) -> Self {
        Self::Status {
            status: status.into(),
        }
    }

    /// Create an encoding error
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Create a decoding error
    pub fn decoding(message: impl Into<String>) -> Self {
        Self::Decoding {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidResponse {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Check if this error is transient and can be retried
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::HttpStatus { status } => matches!(status, 500..=599),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ProtocolError::decoding("unexpected end of document");
        assert!(matches!(err, ProtocolError::Decoding { .. }));
        assert!(err.to_string().contains("unexpected end of document"));
    }

    #[test]
    fn test_transient_errors() {
        assert!(ProtocolError::http_status(503).is_transient());
        assert!(ProtocolError::http_status(500).is_transient());
    }

    #[test]
    fn test_non_transient_errors() {
        let errors = vec![
            ProtocolError::http_status(404),
            ProtocolError::fault(4, "malformed request"),
            ProtocolError::decoding("bad"),
            ProtocolError::missing_field("token"),
            ProtocolError::status("401 Unauthorized"),
        ];

        for err in errors {
            assert!(!err.is_transient(), "{err:?} should not be transient");
        }
    }

    #[test]
    fn test_fault_display() {
        let err = ProtocolError::fault(4, "Too many requests");
        assert_eq!(err.to_string(), "XML-RPC fault 4: Too many requests");
    }
}
