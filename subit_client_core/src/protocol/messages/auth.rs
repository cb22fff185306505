//! Session messages
//!
//! This module contains the LogIn and LogOut calls and the session they share.

use crate::protocol::STATUS_OK;
use crate::protocol::codec::Value;
use crate::protocol::error::{ProtocolError, Result};

/// Method name of the login call
pub const LOGIN_METHOD: &str = "LogIn";

/// Method name of the logout call
pub const LOGOUT_METHOD: &str = "LogOut";

/// LogIn call parameters
#[derive(Clone)]
pub struct LoginRequest {
    /// Username, empty for anonymous sessions
    pub username: String,
    /// Password, empty for anonymous sessions
    pub password: String,
    /// Interface language code
    pub language: String,
    /// Application tag identifying this client
    pub app_tag: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***") // Never log passwords
            .field("language", &self.language)
            .field("app_tag", &self.app_tag)
            .finish()
    }
}

impl LoginRequest {
    /// Positional parameters in the order the service expects
    pub fn to_params(&self) -> Vec<Value> {
        vec![
            Value::from(self.username.as_str()),
            Value::from(self.password.as_str()),
            Value::from(self.language.as_str()),
            Value::from(self.app_tag.as_str()),
        ]
    }
}

/// Response to the LogIn call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    /// Literal status text, `"200 OK"` on success
    pub status: String,
    /// Session token (if granted)
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn from_value(value: &Value) -> Result<Self> {
        if value.as_struct().is_none() {
            return Err(ProtocolError::invalid_response(
                "LogIn struct",
                value.type_name(),
            ));
        }

        let status = value
            .get("status")
            .and_then(Value::as_str)
            .ok_or_else(|| ProtocolError::missing_field("status"))?
            .to_string();
        let token = value
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(Self { status, token })
    }

    /// Check if the service accepted the login
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Session for an accepted login
    pub fn session(&self) -> Result<Session> {
        self.token
            .as_deref()
            .map(Session::new)
            .ok_or_else(|| ProtocolError::missing_field("token"))
    }
}

/// Authentication token of one login/logout pair
///
/// Sessions are values threaded through the calls that need them; nothing
/// keeps a token around after logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// LogOut call parameters
pub fn logout_params(session: &Session) -> Vec<Value> {
    vec![Value::from(session.token())]
}
