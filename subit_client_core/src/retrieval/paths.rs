//! Temporary archive naming

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static ARCHIVE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Make a string safe to use as a single file name component
///
/// `&` becomes `.`; path separators, characters reserved on common file
/// systems, and control characters become `_`.
pub fn sanitize_component(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '&' => '.',
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let stripped = sanitized.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if stripped.is_empty() {
        "subtitle".to_string()
    } else {
        sanitized
    }
}

/// Unique temporary archive path in `dir` derived from the archive entry name
///
/// The name is `<sanitized entry>.<pid>-<seq>.zip`, so concurrent lookups
/// in the same directory never share a file.
pub fn temp_archive_path(dir: &Path, entry_name: &str) -> PathBuf {
    let seq = ARCHIVE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    dir.join(format!(
        "{}.{}-{seq}.zip",
        sanitize_component(entry_name),
        std::process::id()
    ))
}
