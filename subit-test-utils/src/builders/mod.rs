//! Builders for test fixtures

mod archive;
mod record;
mod video;

pub use archive::SubtitleArchiveBuilder;
pub use record::SubtitleRecordBuilder;
pub use video::VideoFileBuilder;
