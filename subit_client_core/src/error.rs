//! Error types for the SubIt Client Core Library
//!
//! This module contains all error types used throughout the library, organized
//! into logical categories for better maintainability and clarity.

use thiserror::Error;

pub mod internal;
pub mod io;
pub mod retrieval;
pub mod service;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::retrieval::RetrievalError;
pub use self::service::{SERVICE_GUIDANCE, ServiceError};
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the SubIt Client Core Library
///
/// Errors are categorized into five main types:
/// - I/O errors: local file system operations
/// - Service errors: login, search and logout against the remote service
/// - Retrieval errors: archive download and extraction
/// - Validation errors: input validation and configuration errors
/// - Internal errors: library internal errors (task failures)
///
/// Fingerprint failures are absent: the search client recovers from them
/// and they never reach callers.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Remote service errors
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Download and extraction errors
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Whether this error came from the remote service session
    pub fn is_service_error(&self) -> bool {
        matches!(self, Self::Service(_))
    }
}

// Conversions from external error types

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl From<crate::protocol::error::ProtocolError> for Error {
    fn from(err: crate::protocol::error::ProtocolError) -> Self {
        Self::Service(ServiceError::Protocol(err))
    }
}
