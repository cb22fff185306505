//! Mock implementations for testing

mod service;

pub use service::MockSubtitleService;
