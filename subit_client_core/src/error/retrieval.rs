//! Errors raised while downloading and unpacking a subtitle archive

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the retrieval pipeline for one search record
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// The archive request did not complete
    #[error("Failed to download archive from '{url}': {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The archive server answered with a non-success HTTP status
    #[error("Archive download from '{url}' failed with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    /// The downloaded file is not a readable zip container
    #[error("Failed to read archive {}: {source}", archive.display())]
    Archive {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The named entry is not in the archive
    #[error("Archive {} has no entry named '{entry}'", archive.display())]
    EntryNotFound { archive: PathBuf, entry: String },

    /// No entry carries the subtitle extension
    #[error("Archive {} contains no '.{extension}' file", archive.display())]
    NoSubtitleEntry { archive: PathBuf, extension: String },
}

impl RetrievalError {
    pub fn download(url: &str, source: reqwest::Error) -> Self {
        Self::Download {
            url: url.to_string(),
            source,
        }
    }

    pub fn http_status(url: &str, status: u16) -> Self {
        Self::HttpStatus {
            url: url.to_string(),
            status,
        }
    }

    pub fn archive(archive: &std::path::Path, source: zip::result::ZipError) -> Self {
        Self::Archive {
            archive: archive.to_path_buf(),
            source,
        }
    }

    pub fn entry_not_found(archive: &std::path::Path, entry: &str) -> Self {
        Self::EntryNotFound {
            archive: archive.to_path_buf(),
            entry: entry.to_string(),
        }
    }

    pub fn no_subtitle_entry(archive: &std::path::Path, extension: &str) -> Self {
        Self::NoSubtitleEntry {
            archive: archive.to_path_buf(),
            extension: extension.to_string(),
        }
    }
}
