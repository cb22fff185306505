//! The find-subtitle operation

use super::handle::LookupHandle;
use super::selection::select_record;
use super::types::{LookupOutcome, NotFoundReason};
use crate::error::{Result, ValidationError};
use crate::protocol::{ProtocolConfig, XmlRpcClient};
use crate::retrieval::RetrievalPipeline;
use crate::search::{LanguagePreference, SearchClient};
use crate::video::VideoFile;
use crate::{ClientConfig, NetworkConfig};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Finds and writes the subtitle for a video
///
/// A lookup is one sequential unit of work: login, search, fallback,
/// logout, download, extract. The finder is cheap to clone; clones share
/// the HTTP connection pools.
#[derive(Clone)]
pub struct SubtitleFinder {
    search: SearchClient,
    retrieval: RetrievalPipeline,
}

impl SubtitleFinder {
    pub fn new(search: SearchClient, retrieval: RetrievalPipeline) -> Self {
        Self { search, retrieval }
    }

    /// Build a finder talking to the configured service
    pub fn from_config(client: &ClientConfig, network: &NetworkConfig) -> Result<Self> {
        client.validate()?;
        network.validate()?;

        let protocol = ProtocolConfig {
            endpoint: client.endpoint.clone(),
            app_tag: client.app_tag.clone(),
            user_agent: client.user_agent.clone(),
            username: client.username.clone(),
            password: client.password.clone(),
            language: client.interface_language.clone(),
            request_timeout: network.timeout(),
        };
        let service = XmlRpcClient::new(protocol).map_err(|e| {
            ValidationError::invalid_configuration(&format!("Cannot build HTTP client: {e}"))
        })?;
        let search = SearchClient::new(Arc::new(service))
            .with_login_retry_delay(network.login_retry_delay());

        let http = reqwest::Client::builder()
            .timeout(network.timeout())
            .user_agent(client.user_agent.clone())
            .build()
            .map_err(|e| {
                ValidationError::invalid_configuration(&format!("Cannot build HTTP client: {e}"))
            })?;
        let retrieval = RetrievalPipeline::new(http, client.subtitle_extension.clone());

        Ok(Self::new(search, retrieval))
    }

    /// Find the subtitle for `video_path` in the first available language
    pub async fn find_subtitle(
        &self,
        video_path: &Path,
        languages: &LanguagePreference,
    ) -> Result<LookupOutcome> {
        let video = VideoFile::new(video_path);
        debug!(
            "Looking up subtitles for {} in [{languages}]",
            video.path().display()
        );

        let records = self.search.search(&video, languages).await?;
        if records.is_empty() {
            info!("No subtitles found");
            return Ok(LookupOutcome::NotFound(NotFoundReason::NoResults));
        }

        let Some(record) = select_record(&records, languages) else {
            info!(
                "No subtitles found in the requested languages ({} results in other languages)",
                records.len()
            );
            return Ok(LookupOutcome::NotFound(NotFoundReason::NoLanguageMatch));
        };

        info!("Found {} subtitle", record.language_name);
        let path = self.retrieval.retrieve(record, &video).await?;
        Ok(LookupOutcome::Found(path))
    }

    /// Start the lookup on the runtime and return immediately
    pub fn spawn(&self, video_path: PathBuf, languages: LanguagePreference) -> LookupHandle {
        let finder = self.clone();
        LookupHandle::new(tokio::spawn(async move {
            finder.find_subtitle(&video_path, &languages).await
        }))
    }
}
