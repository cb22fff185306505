//! Record to subtitle file

use super::archive::TempArchive;
use super::download::download_archive;
use super::extract::extract_subtitle;
use super::paths::temp_archive_path;
use crate::error::{InternalError, Result};
use crate::protocol::SubtitleRecord;
use crate::video::VideoFile;
use log::info;
use std::path::PathBuf;

/// Downloads a record's archive and writes its subtitle beside the video
#[derive(Debug, Clone)]
pub struct RetrievalPipeline {
    http: reqwest::Client,
    extension: String,
}

impl RetrievalPipeline {
    pub fn new(http: reqwest::Client, extension: impl Into<String>) -> Self {
        Self {
            http,
            extension: extension.into(),
        }
    }

    /// Subtitle extension written by this pipeline
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Fetch `record` and return the path of the written subtitle
    ///
    /// The temporary archive is gone when this returns, whatever the result.
    pub async fn retrieve(&self, record: &SubtitleRecord, video: &VideoFile) -> Result<PathBuf> {
        let archive = TempArchive::new(temp_archive_path(video.directory(), &record.file_name));

        info!("Downloading {}", record.file_name);
        download_archive(&self.http, &record.download_url, &archive).await?;

        let archive_path = archive.path().to_path_buf();
        let entry_name = Some(record.file_name.clone()).filter(|name| !name.is_empty());
        let extension = self.extension.clone();
        let target = video.subtitle_path(&self.extension);

        let extracted = tokio::task::spawn_blocking(move || {
            extract_subtitle(&archive_path, entry_name.as_deref(), &extension, &target)
        })
        .await
        .map_err(|e| InternalError::task_failed("subtitle extraction", e.to_string()))?;

        drop(archive);
        extracted
    }
}
