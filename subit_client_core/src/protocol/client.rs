//! HTTP client for the XML-RPC API
//!
//! This module provides the main interface for talking to the subtitle
//! service: every call is one POST of a `<methodCall>` document.

use crate::protocol::codec::{Codec, Value};
use crate::protocol::error::{ProtocolError, Result};
use crate::protocol::messages::{
    LOGIN_METHOD, LOGOUT_METHOD, LoginRequest, LoginResponse, SEARCH_METHOD, SearchCriteria,
    Session, SubtitleRecord, logout_params, parse_search_response, search_params,
};
use log::{debug, trace, warn};
use std::time::Duration;

/// Protocol client configuration
#[derive(Clone)]
pub struct ProtocolConfig {
    /// XML-RPC endpoint URL
    pub endpoint: String,
    /// Application tag sent with LogIn
    pub app_tag: String,
    /// HTTP user agent
    pub user_agent: String,
    /// Username, empty for anonymous
    pub username: String,
    /// Password, empty for anonymous
    pub password: String,
    /// Interface language sent with LogIn
    pub language: String,
    /// Request timeout
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ProtocolConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolConfig")
            .field("endpoint", &self.endpoint)
            .field("app_tag", &self.app_tag)
            .field("user_agent", &self.user_agent)
            .field("username", &self.username)
            .field("password", &"***")
            .field("language", &self.language)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            endpoint: crate::protocol::DEFAULT_ENDPOINT.to_string(),
            app_tag: crate::protocol::DEFAULT_APP_TAG.to_string(),
            user_agent: crate::protocol::DEFAULT_APP_TAG.to_string(),
            username: String::new(),
            password: String::new(),
            language: String::new(),
            request_timeout: Duration::from_secs(crate::protocol::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProtocolConfig {
    fn login_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            language: self.language.clone(),
            app_tag: self.app_tag.clone(),
        }
    }
}

/// XML-RPC client for the subtitle service
///
/// The client holds no session state; tokens are returned by [`login`]
/// and passed back into the calls that need them.
///
/// [`login`]: XmlRpcClient::login
pub struct XmlRpcClient {
    config: ProtocolConfig,
    http: reqwest::Client,
}

impl XmlRpcClient {
    /// Create a new protocol client
    pub fn new(config: ProtocolConfig) -> Result<Self> {
        debug!("Creating XML-RPC client with config: {config:?}");
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, http })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Perform one XML-RPC call and return its decoded value
    pub async fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
        let body = Codec::new().encode_call(method, params)?;
        let endpoint = &self.config.endpoint;
        trace!("POST {endpoint} ({method}, {} bytes)", body.len());

        let response = self
            .http
            .post(&self.config.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!("{method} request to {} failed: {e}", self.config.endpoint);
                ProtocolError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{method} returned HTTP {status}");
            return Err(ProtocolError::http_status(status.as_u16()));
        }

        let text = response.text().await?;
        Codec::new().decode_response(&text)
    }

    /// Open a session
    ///
    /// A response with a non-success status is returned as-is; deciding what
    /// to do with it belongs to the caller.
    pub async fn login(&self) -> Result<LoginResponse> {
        let request = self.config.login_request();
        debug!("Logging in: {request:?}");

        let value = self.call(LOGIN_METHOD, &request.to_params()).await?;
        let response = LoginResponse::from_value(&value)?;
        debug!("Login status: {}", response.status);
        Ok(response)
    }

    /// Run one search query
    pub async fn search(
        &self,
        session: &Session,
        criteria: &SearchCriteria,
    ) -> Result<Vec<SubtitleRecord>> {
        debug!("Searching by {}: {criteria:?}", criteria.kind());
        let value = self
            .call(SEARCH_METHOD, &search_params(session, criteria))
            .await?;
        let records = parse_search_response(&value)?;
        debug!("Search returned {} records", records.len());
        Ok(records)
    }

    /// End a session
    pub async fn logout(&self, session: &Session) -> Result<()> {
        self.call(LOGOUT_METHOD, &logout_params(session)).await?;
        debug!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProtocolConfig::default();
        assert_eq!(config.endpoint, "http://api.opensubtitles.org/xml-rpc");
        assert_eq!(config.app_tag, "SubIt");
        assert!(config.username.is_empty());
        assert!(config.password.is_empty());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_debug_masks_password() {
        let config = ProtocolConfig {
            password: "secret".to_string(),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn test_login_request_uses_config() {
        let config = ProtocolConfig {
            app_tag: "Custom".to_string(),
            language: "en".to_string(),
            ..Default::default()
        };
        let request = config.login_request();
        assert_eq!(request.app_tag, "Custom");
        assert_eq!(request.language, "en");
        assert!(request.username.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let config = ProtocolConfig {
            // Port 9 on localhost: nothing listens there in test environments
            endpoint: "http://127.0.0.1:9/xml-rpc".to_string(),
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        };
        let client = XmlRpcClient::new(config).unwrap();

        let err = client.login().await.unwrap_err();
        assert!(err.is_transient());
    }
}
