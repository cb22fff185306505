//! Test utilities for the SubIt client
//!
//! This crate provides a scripted in-memory subtitle service, a wiremock
//! stub of the real XML-RPC endpoint, and builders for synthetic videos,
//! subtitle archives and search records.

pub mod builders;
pub mod mocks;
pub mod server;

// Re-export commonly used types
pub use builders::{SubtitleArchiveBuilder, SubtitleRecordBuilder, VideoFileBuilder};
pub use mocks::MockSubtitleService;
pub use server::StubService;
