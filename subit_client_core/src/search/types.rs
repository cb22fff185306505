//! Requested subtitle languages

use crate::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// Ordered list of requested language codes, highest priority first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePreference {
    codes: Vec<String>,
}

impl LanguagePreference {
    /// Build from individual codes; blank codes are dropped
    pub fn new<I, S>(codes: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes: Vec<String> = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if codes.is_empty() {
            return Err(ValidationError::invalid_parameter(
                "languages",
                "at least one language code is required",
            ));
        }
        Ok(Self { codes })
    }

    /// Parse a comma-separated list such as `"fre,eng"`
    pub fn parse(list: &str) -> Result<Self, ValidationError> {
        Self::new(list.split(','))
    }

    /// Codes in priority order
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Comma-joined form used as the service-side language filter
    pub fn joined(&self) -> String {
        self.codes.join(",")
    }
}

impl FromStr for LanguagePreference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LanguagePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}
