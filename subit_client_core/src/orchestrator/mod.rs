//! Find-a-subtitle operation
//!
//! Composes the search client and the retrieval pipeline. A lookup either
//! writes a subtitle, reports that none was found, or fails.

pub mod finder;
pub mod handle;
pub mod selection;
pub mod types;

pub use finder::SubtitleFinder;
pub use handle::LookupHandle;
pub use selection::select_record;
pub use types::{LookupOutcome, NotFoundReason};
