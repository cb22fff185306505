//! SearchSubtitles call and its results

use crate::fingerprint::Fingerprint;
use crate::protocol::STATUS_OK;
use crate::protocol::codec::Value;
use crate::protocol::error::{ProtocolError, Result};
use crate::protocol::messages::Session;
use log::warn;

/// Method name of the search call
pub const SEARCH_METHOD: &str = "SearchSubtitles";

/// What a single search query matches on
///
/// A query is either fingerprint based or title based, never both. The
/// fallback replaces the criteria instead of extending it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    /// Match on content fingerprint and exact byte size
    Fingerprint {
        fingerprint: Fingerprint,
        byte_size: u64,
        languages: String,
    },
    /// Free-text title match
    Title { query: String, languages: String },
}

impl SearchCriteria {
    pub fn fingerprint(fingerprint: Fingerprint, byte_size: u64, languages: &str) -> Self {
        Self::Fingerprint {
            fingerprint,
            byte_size,
            languages: languages.to_string(),
        }
    }

    pub fn title(query: impl Into<String>, languages: &str) -> Self {
        Self::Title {
            query: query.into(),
            languages: languages.to_string(),
        }
    }

    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fingerprint { .. } => "fingerprint",
            Self::Title { .. } => "title",
        }
    }

    /// Criteria struct as sent on the wire
    pub fn to_value(&self) -> Value {
        match self {
            Self::Fingerprint {
                fingerprint,
                byte_size,
                languages,
            } => Value::structure([
                ("sublanguageid", Value::from(languages.as_str())),
                ("moviehash", Value::from(fingerprint.to_hex())),
                // The service expects the size as a decimal string
                ("moviebytesize", Value::from(byte_size.to_string())),
            ]),
            Self::Title { query, languages } => Value::structure([
                ("sublanguageid", Value::from(languages.as_str())),
                ("query", Value::from(query.as_str())),
            ]),
        }
    }
}

/// SearchSubtitles call parameters: token, then a one-element criteria list
pub fn search_params(session: &Session, criteria: &SearchCriteria) -> Vec<Value> {
    vec![
        Value::from(session.token()),
        Value::Array(vec![criteria.to_value()]),
    ]
}

/// One subtitle found by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleRecord {
    /// Language code (`SubLanguageID`)
    pub language_code: String,
    /// Display language name (`LanguageName`)
    pub language_name: String,
    /// Archive download URL (`ZipDownloadLink`)
    pub download_url: String,
    /// Subtitle file name inside the archive (`SubFileName`)
    pub file_name: String,
    /// Service-side subtitle file id (`IDSubtitleFile`)
    pub subtitle_id: Option<String>,
    /// Subtitle format, e.g. `srt` (`SubFormat`)
    pub format: Option<String>,
    /// Movie the subtitle belongs to (`MovieName`)
    pub movie_name: Option<String>,
    /// Download counter (`SubDownloadsCnt`)
    pub download_count: Option<u64>,
}

impl SubtitleRecord {
    pub fn from_value(value: &Value) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ProtocolError::missing_field(key))
        };
        let optional = |key: &str| -> Option<String> {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let download_count = match value.get("SubDownloadsCnt") {
            Some(Value::Int(count)) => u64::try_from(*count).ok(),
            Some(Value::String(count)) => count.trim().parse().ok(),
            _ => None,
        };

        Ok(Self {
            language_code: required("SubLanguageID")?,
            language_name: required("LanguageName")?,
            download_url: required("ZipDownloadLink")?,
            file_name: required("SubFileName")?,
            subtitle_id: optional("IDSubtitleFile"),
            format: optional("SubFormat"),
            movie_name: optional("MovieName"),
            download_count,
        })
    }

    /// Wire form of the record, as the service sends it
    pub fn to_value(&self) -> Value {
        let mut members = vec![
            ("SubLanguageID", Value::from(self.language_code.as_str())),
            ("LanguageName", Value::from(self.language_name.as_str())),
            ("ZipDownloadLink", Value::from(self.download_url.as_str())),
            ("SubFileName", Value::from(self.file_name.as_str())),
        ];
        if let Some(id) = &self.subtitle_id {
            members.push(("IDSubtitleFile", Value::from(id.as_str())));
        }
        if let Some(format) = &self.format {
            members.push(("SubFormat", Value::from(format.as_str())));
        }
        if let Some(movie) = &self.movie_name {
            members.push(("MovieName", Value::from(movie.as_str())));
        }
        if let Some(count) = self.download_count {
            members.push(("SubDownloadsCnt", Value::from(count.to_string())));
        }
        Value::structure(members)
    }
}

/// Extract the records of a SearchSubtitles response
///
/// The service reports "nothing found" as `data = false` or by omitting
/// `data`; both yield an empty list. Records missing a required field are
/// skipped.
pub fn parse_search_response(value: &Value) -> Result<Vec<SubtitleRecord>> {
    if value.as_struct().is_none() {
        return Err(ProtocolError::invalid_response(
            "SearchSubtitles struct",
            value.type_name(),
        ));
    }

    if let Some(status) = value.get("status").and_then(Value::as_str)
        && status != STATUS_OK
    {
        return Err(ProtocolError::status(status));
    }

    let items = match value.get("data") {
        Some(Value::Array(items)) => items,
        None | Some(Value::Bool(false)) | Some(Value::Nil) => return Ok(Vec::new()),
        Some(other) => {
            return Err(ProtocolError::invalid_response(
                "data array",
                other.type_name(),
            ));
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match SubtitleRecord::from_value(item) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping malformed search result: {e}"),
        }
    }
    Ok(records)
}
