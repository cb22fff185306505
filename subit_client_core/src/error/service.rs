//! Errors raised while talking to the remote subtitle service

use crate::protocol::error::ProtocolError;
use thiserror::Error;

/// Guidance shown to the user whenever the service cannot be used
pub const SERVICE_GUIDANCE: &[&str] = &[
    "Check your Internet connection status",
    "Check that www.opensubtitles.org is available",
    "Check your downloads limit (200 subtitles per 24h)",
];

/// Fatal, user-facing failures of the search session
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Login could not reach the service, even after the retry
    #[error("Unable to reach the subtitle service after {attempts} attempts: {source}")]
    Unreachable {
        attempts: u32,
        #[source]
        source: ProtocolError,
    },

    /// The service answered the login with a non-success status
    #[error("Subtitle service refused the connection: {status}")]
    LoginRefused { status: String },

    /// A call inside an established session failed
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ServiceError {
    /// Create an unreachable error
    pub fn unreachable(attempts: u32, source: ProtocolError) -> Self {
        Self::Unreachable { attempts, source }
    }

    /// Create a login refused error carrying the literal status text
    pub fn login_refused(status: impl Into<String>) -> Self {
        Self::LoginRefused {
            status: status.into(),
        }
    }

    /// Actionable hints for the user
    pub fn guidance(&self) -> &'static [&'static str] {
        match self {
            Self::Unreachable { .. } | Self::LoginRefused { .. } => SERVICE_GUIDANCE,
            Self::Protocol(err) if err.is_transient() => SERVICE_GUIDANCE,
            Self::Protocol(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_refused_keeps_literal_status() {
        let error = ServiceError::login_refused("503 Service Unavailable");
        assert!(error.to_string().contains("503 Service Unavailable"));
        assert_eq!(error.guidance().len(), 3);
    }

    #[test]
    fn test_unreachable_mentions_attempts() {
        let error = ServiceError::unreachable(2, ProtocolError::http_status(502));
        assert!(error.to_string().contains("2 attempts"));
        let guidance = error.guidance();
        assert!(guidance.iter().any(|g| g.contains("200 subtitles")));
    }

    #[test]
    fn test_fault_has_no_guidance() {
        let error = ServiceError::from(ProtocolError::fault(1, "bad request"));
        assert!(error.guidance().is_empty());
        assert!(error.to_string().contains("bad request"));
    }
}
