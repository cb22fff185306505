//! SubIt Client Core Library
//!
//! This is the core library of the SubIt subtitle finder, providing the
//! video fingerprint, the XML-RPC client of the subtitle service, the
//! search session, and the download-and-extract pipeline.

pub mod error;
pub mod fingerprint;
pub mod orchestrator;
pub mod protocol;
pub mod retrieval;
pub mod search;
pub mod video;

// Re-export main types
pub use error::{Error, Result};
pub use fingerprint::{FileFingerprint, Fingerprint, FingerprintError, compute_fingerprint};
pub use orchestrator::{LookupHandle, LookupOutcome, NotFoundReason, SubtitleFinder};
pub use protocol::SubtitleRecord;
pub use search::{LanguagePreference, SearchClient, SubtitleService};
pub use video::VideoFile;

use error::ValidationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default extension of the written subtitle
pub const DEFAULT_SUBTITLE_EXTENSION: &str = "srt";

/// Service and output configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// XML-RPC endpoint of the subtitle service
    pub endpoint: String,
    /// Application tag sent at login
    pub app_tag: String,
    /// HTTP user agent
    pub user_agent: String,
    /// Account name, empty for anonymous use
    pub username: String,
    /// Account password, empty for anonymous use
    pub password: String,
    /// Interface language sent at login
    pub interface_language: String,
    /// Extension of the written subtitle, without the dot
    pub subtitle_extension: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("app_tag", &self.app_tag)
            .field("user_agent", &self.user_agent)
            .field("username", &self.username)
            .field("password", &"***")
            .field("interface_language", &self.interface_language)
            .field("subtitle_extension", &self.subtitle_extension)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: protocol::DEFAULT_ENDPOINT.to_string(),
            app_tag: protocol::DEFAULT_APP_TAG.to_string(),
            user_agent: protocol::DEFAULT_APP_TAG.to_string(),
            username: String::new(),
            password: String::new(),
            interface_language: String::new(),
            subtitle_extension: DEFAULT_SUBTITLE_EXTENSION.to_string(),
        }
    }
}

impl ClientConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(Error::Validation(ValidationError::invalid_configuration(
                "endpoint must not be empty",
            )));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::Validation(ValidationError::invalid_configuration(
                "endpoint must be an http:// or https:// URL",
            )));
        }
        if self.app_tag.trim().is_empty() {
            return Err(Error::Validation(ValidationError::invalid_configuration(
                "app_tag must not be empty",
            )));
        }

        let ext = &self.subtitle_extension;
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(Error::Validation(ValidationError::invalid_parameter(
                "subtitle_extension",
                "must be a bare extension such as 'srt'",
            )));
        }
        Ok(())
    }
}

/// Network timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Wait before the single login retry, in milliseconds
    pub login_retry_delay_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: protocol::DEFAULT_TIMEOUT_SECS,
            login_retry_delay_ms: protocol::LOGIN_RETRY_DELAY_MS,
        }
    }
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn login_retry_delay(&self) -> Duration {
        Duration::from_millis(self.login_retry_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(Error::Validation(ValidationError::invalid_parameter(
                "timeout_seconds",
                "must be greater than zero",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let client = ClientConfig::default();
        assert!(client.validate().is_ok());
        assert_eq!(client.app_tag, "SubIt");
        assert!(client.username.is_empty());
        assert_eq!(client.subtitle_extension, "srt");

        let network = NetworkConfig::default();
        assert!(network.validate().is_ok());
        assert_eq!(network.login_retry_delay(), Duration::from_secs(3));
        assert_eq!(network.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_extension() {
        for ext in ["", ".srt", "sub/srt", "a\\b"] {
            let config = ClientConfig {
                subtitle_extension: ext.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "'{ext}' should be rejected");
        }
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = ClientConfig {
            endpoint: "ftp://example.org".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_debug_masks_password() {
        let config = ClientConfig {
            password: "hunter2".to_string(),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
