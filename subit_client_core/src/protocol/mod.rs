//! XML-RPC protocol client for the remote subtitle service
//!
//! This module implements the client side of the service's XML-RPC API:
//! - `codec`: XML-RPC value model and document encoding/decoding
//! - `messages`: typed LogIn, SearchSubtitles and LogOut messages
//! - `client`: HTTP transport over reqwest

pub mod client;
pub mod codec;
pub mod error;
pub mod messages;

// Re-export main types
pub use client::{ProtocolConfig, XmlRpcClient};
pub use error::{ProtocolError, Result};
pub use messages::{LoginResponse, SearchCriteria, Session, SubtitleRecord};

/// Default XML-RPC endpoint of the subtitle service
pub const DEFAULT_ENDPOINT: &str = "http://api.opensubtitles.org/xml-rpc";

/// Application tag the client identifies itself with at login
pub const DEFAULT_APP_TAG: &str = "SubIt";

/// Status literal the service uses for success
pub const STATUS_OK: &str = "200 OK";

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Wait before the single login retry, in milliseconds
pub const LOGIN_RETRY_DELAY_MS: u64 = 3000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_constants() {
        assert_eq!(DEFAULT_ENDPOINT, "http://api.opensubtitles.org/xml-rpc");
        assert_eq!(DEFAULT_APP_TAG, "SubIt");
        assert_eq!(STATUS_OK, "200 OK");
        assert_eq!(LOGIN_RETRY_DELAY_MS, 3000);
    }
}
