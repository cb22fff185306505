//! Search session against the subtitle service
//!
//! One search is one session: login (with a single delayed retry), a
//! fingerprint query, an optional title query, and a logout.

pub mod client;
pub mod service;
pub mod types;

pub use client::SearchClient;
pub use service::SubtitleService;
pub use types::LanguagePreference;
