//! Lookup outcomes

use std::fmt;
use std::path::{Path, PathBuf};

/// Why a lookup ended without a subtitle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// Both queries came back empty
    NoResults,
    /// Results exist, none in a requested language
    NoLanguageMatch,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResults => f.write_str("the service returned no subtitles for this video"),
            Self::NoLanguageMatch => f.write_str("no subtitle in the requested languages"),
        }
    }
}

/// Terminal state of a successful lookup
///
/// Not finding a subtitle is a valid outcome, distinct from every error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Subtitle written at this path
    Found(PathBuf),
    NotFound(NotFoundReason),
}

impl LookupOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound(_) => None,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound(_) => None,
        }
    }
}
