//! In-memory subtitle archives

use std::io::{Cursor, Write};

/// Builder for zip archives as served by the download endpoint
#[derive(Default)]
pub struct SubtitleArchiveBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl SubtitleArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; entries keep insertion order
    pub fn with_entry(mut self, name: &str, content: &[u8]) -> Self {
        self.entries.push((name.to_string(), content.to_vec()));
        self
    }

    /// Zip bytes of the archive
    pub fn build(self) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in &self.entries {
            writer.start_file(name.as_str(), options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }
}
