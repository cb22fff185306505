//! Synthetic video files

use std::path::{Path, PathBuf};

/// Builder for a synthetic video file of exact size
///
/// Content is a repeating byte pattern, so the fingerprint is deterministic
/// but not trivially zero.
pub struct VideoFileBuilder {
    dir: PathBuf,
    name: String,
    size: usize,
    fill: Option<u8>,
}

impl VideoFileBuilder {
    /// Video file in `dir`, 200000 bytes, named `movie.mkv`
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            name: "movie.mkv".to_string(),
            size: 200_000,
            fill: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Use a constant byte instead of the default pattern
    pub fn with_fill(mut self, byte: u8) -> Self {
        self.fill = Some(byte);
        self
    }

    /// Write the file and return its path
    pub fn build(self) -> PathBuf {
        let content: Vec<u8> = match self.fill {
            Some(byte) => vec![byte; self.size],
            None => (0..self.size).map(|i| (i % 251) as u8).collect(),
        };
        let path = self.dir.join(&self.name);
        std::fs::write(&path, content).unwrap();
        path
    }
}
