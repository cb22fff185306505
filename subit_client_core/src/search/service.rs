//! Abstraction over the three remote operations

use crate::protocol::{self, LoginResponse, SearchCriteria, Session, SubtitleRecord, XmlRpcClient};
use async_trait::async_trait;

/// The remote subtitle service as seen by the search client
///
/// Implemented by [`XmlRpcClient`] for the real service and by mocks in
/// tests. Implementations report login status as data; they never decide
/// whether a status is fatal.
#[async_trait]
pub trait SubtitleService: Send + Sync {
    /// Open a session
    async fn login(&self) -> protocol::Result<LoginResponse>;

    /// Run one query inside a session
    async fn search(
        &self,
        session: &Session,
        criteria: &SearchCriteria,
    ) -> protocol::Result<Vec<SubtitleRecord>>;

    /// End a session
    async fn logout(&self, session: &Session) -> protocol::Result<()>;
}

#[async_trait]
impl SubtitleService for XmlRpcClient {
    async fn login(&self) -> protocol::Result<LoginResponse> {
        XmlRpcClient::login(self).await
    }

    async fn search(
        &self,
        session: &Session,
        criteria: &SearchCriteria,
    ) -> protocol::Result<Vec<SubtitleRecord>> {
        XmlRpcClient::search(self, session, criteria).await
    }

    async fn logout(&self, session: &Session) -> protocol::Result<()> {
        XmlRpcClient::logout(self, session).await
    }
}
