//! The video file a subtitle is looked up for

use crate::fingerprint::{FileFingerprint, FingerprintError, compute_fingerprint};
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;

/// A video file, scoped to one lookup
///
/// The fingerprint is computed on first use and cached for the rest of the
/// lookup. Failures are not cached.
#[derive(Debug)]
pub struct VideoFile {
    path: PathBuf,
    fingerprint: OnceCell<FileFingerprint>,
}

impl VideoFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fingerprint: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the video; falls back to the current directory
    pub fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// File name without its extension, used as the free-text title query
    ///
    /// A name that is only a dot and an extension, such as `.mkv`, has an
    /// empty base name.
    pub fn base_name(&self) -> String {
        let Some(stem) = self.path.file_stem() else {
            return String::new();
        };
        let stem = stem.to_string_lossy();
        match stem.strip_prefix('.') {
            Some(rest) if self.path.extension().is_none() && !rest.contains('.') => String::new(),
            _ => stem.into_owned(),
        }
    }

    /// Where the subtitle for this video is written: same directory, same
    /// base name, subtitle extension
    pub fn subtitle_path(&self, extension: &str) -> PathBuf {
        if self.base_name().is_empty() {
            return self.path.with_file_name(format!(".{extension}"));
        }
        self.path.with_extension(extension)
    }

    /// Content fingerprint, computed lazily
    pub async fn fingerprint(&self) -> Result<FileFingerprint, FingerprintError> {
        self.fingerprint
            .get_or_try_init(|| compute_fingerprint(&self.path))
            .await
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_base_name_strips_last_extension() {
        let video = VideoFile::new("/media/The.Movie.2010.mkv");
        assert_eq!(video.base_name(), "The.Movie.2010");
    }

    #[test]
    fn test_subtitle_path_is_sibling_with_extension() {
        let video = VideoFile::new("/media/The.Movie.2010.mkv");
        assert_eq!(
            video.subtitle_path("srt"),
            PathBuf::from("/media/The.Movie.2010.srt")
        );

        let bare = VideoFile::new("/media/movie");
        assert_eq!(bare.subtitle_path("srt"), PathBuf::from("/media/movie.srt"));
    }

    #[test]
    fn test_extension_only_name_has_empty_base_name() {
        let video = VideoFile::new("/media/.mkv");
        assert_eq!(video.base_name(), "");
        assert_eq!(video.subtitle_path("srt"), PathBuf::from("/media/.srt"));

        let hidden = VideoFile::new("/media/.hidden.mkv");
        assert_eq!(hidden.base_name(), ".hidden");
    }

    #[test]
    fn test_directory_of_relative_file_is_current_dir() {
        let video = VideoFile::new("movie.avi");
        assert_eq!(video.directory(), Path::new("."));
    }

    #[tokio::test]
    async fn test_fingerprint_is_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movie.avi");
        std::fs::write(&path, vec![0u8; 131072]).unwrap();

        let video = VideoFile::new(&path);
        let first = video.fingerprint().await.unwrap();

        // Changing the file after the first computation must not change the value
        std::fs::write(&path, vec![1u8; 131072]).unwrap();
        let second = video.fingerprint().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fingerprint_failure_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movie.avi");
        std::fs::write(&path, vec![0u8; 16]).unwrap();

        let video = VideoFile::new(&path);
        assert!(matches!(
            video.fingerprint().await,
            Err(FingerprintError::TooSmall { size: 16 })
        ));

        std::fs::write(&path, vec![0u8; 131072]).unwrap();
        assert!(video.fingerprint().await.is_ok());
    }
}
