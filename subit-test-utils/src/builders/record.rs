//! Search result records

use subit_client_core::SubtitleRecord;

/// Builder for [`SubtitleRecord`] values
pub struct SubtitleRecordBuilder {
    record: SubtitleRecord,
}

impl SubtitleRecordBuilder {
    /// Record in `language`, downloadable from a placeholder URL
    pub fn new(language: &str) -> Self {
        Self {
            record: SubtitleRecord {
                language_code: language.to_string(),
                language_name: language.to_string(),
                download_url: format!("http://downloads.invalid/{language}.zip"),
                file_name: "movie.srt".to_string(),
                subtitle_id: None,
                format: Some("srt".to_string()),
                movie_name: None,
                download_count: None,
            },
        }
    }

    pub fn with_language_name(mut self, name: &str) -> Self {
        self.record.language_name = name.to_string();
        self
    }

    pub fn with_download_url(mut self, url: &str) -> Self {
        self.record.download_url = url.to_string();
        self
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        self.record.file_name = name.to_string();
        self
    }

    pub fn with_movie_name(mut self, name: &str) -> Self {
        self.record.movie_name = Some(name.to_string());
        self
    }

    pub fn build(self) -> SubtitleRecord {
        self.record
    }
}
