//! Search client with login retry and title fallback

use super::service::SubtitleService;
use super::types::LanguagePreference;
use crate::error::ServiceError;
use crate::protocol::{
    LOGIN_RETRY_DELAY_MS, ProtocolError, SearchCriteria, Session, SubtitleRecord,
};
use crate::video::VideoFile;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Runs one search session per call
///
/// Every call that gets past login ends with exactly one logout, whatever
/// the outcome of the queries.
#[derive(Clone)]
pub struct SearchClient {
    service: Arc<dyn SubtitleService>,
    login_retry_delay: Duration,
}

impl SearchClient {
    /// Create a new search client
    pub fn new(service: Arc<dyn SubtitleService>) -> Self {
        Self {
            service,
            login_retry_delay: Duration::from_millis(LOGIN_RETRY_DELAY_MS),
        }
    }

    /// Override the wait before the login retry
    pub fn with_login_retry_delay(mut self, delay: Duration) -> Self {
        self.login_retry_delay = delay;
        self
    }

    /// Search subtitles for a video
    ///
    /// Returns the raw record list in service order, possibly empty. Language
    /// selection is left to the caller.
    pub async fn search(
        &self,
        video: &VideoFile,
        languages: &LanguagePreference,
    ) -> Result<Vec<SubtitleRecord>, ServiceError> {
        let session = self.open_session().await?;

        let result = self.run_queries(&session, video, languages).await;

        if let Err(e) = self.service.logout(&session).await {
            warn!("Logout failed: {e}");
        }

        Ok(result?)
    }

    /// Login, retrying once after a delay when the service cannot be reached
    async fn open_session(&self) -> Result<Session, ServiceError> {
        info!("Contacting the subtitle service");

        let response = match self.service.login().await {
            Ok(response) => response,
            Err(first) => {
                warn!(
                    "Login failed ({first}), retrying in {:?}",
                    self.login_retry_delay
                );
                sleep(self.login_retry_delay).await;
                self.service
                    .login()
                    .await
                    .map_err(|second| ServiceError::unreachable(2, second))?
            }
        };

        if !response.is_success() {
            warn!("Login refused with status '{}'", response.status);
            return Err(ServiceError::login_refused(response.status));
        }

        Ok(response.session()?)
    }

    async fn run_queries(
        &self,
        session: &Session,
        video: &VideoFile,
        languages: &LanguagePreference,
    ) -> Result<Vec<SubtitleRecord>, ProtocolError> {
        let filter = languages.joined();

        match video.fingerprint().await {
            Ok(fp) => {
                debug!(
                    "Fingerprint of {}: {} ({} bytes)",
                    video.path().display(),
                    fp.fingerprint,
                    fp.byte_size
                );
                let criteria = SearchCriteria::fingerprint(fp.fingerprint, fp.byte_size, &filter);
                let records = self.service.search(session, &criteria).await?;
                if !records.is_empty() {
                    return Ok(records);
                }
                info!("Could not find subtitles by fingerprint");
            }
            Err(e) => info!("Could not fingerprint {}: {e}", video.path().display()),
        }

        let title = video.base_name();
        if title.is_empty() {
            debug!("Video has no base name, skipping title search");
            return Ok(Vec::new());
        }

        info!("Searching by name: {title}");
        let criteria = SearchCriteria::title(title, &filter);
        self.service.search(session, &criteria).await
    }
}
