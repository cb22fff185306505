//! Download-and-extract pipeline
//!
//! Turns a search record into a subtitle file beside the video:
//! - `paths`: temporary archive naming
//! - `archive`: scoped ownership of the temporary archive
//! - `download`: streaming HTTP download
//! - `extract`: entry selection and atomic write of the subtitle
//! - `pipeline`: the steps above in order

pub mod archive;
pub mod download;
pub mod extract;
pub mod paths;
pub mod pipeline;

pub use archive::TempArchive;
pub use extract::extract_subtitle;
pub use paths::{sanitize_component, temp_archive_path};
pub use pipeline::RetrievalPipeline;
