//! Language-priority record selection

use crate::protocol::SubtitleRecord;
use crate::search::LanguagePreference;

/// First record in the highest-priority language that has one
///
/// Requested language order wins over the service's ranking; within a
/// language, the service order is kept.
pub fn select_record<'a>(
    records: &'a [SubtitleRecord],
    languages: &LanguagePreference,
) -> Option<&'a SubtitleRecord> {
    languages
        .iter()
        .find_map(|code| records.iter().find(|r| r.language_code == code))
}
