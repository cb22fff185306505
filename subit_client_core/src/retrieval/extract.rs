//! Subtitle extraction from a zip archive

use crate::error::{IoError, Result, RetrievalError};
use log::{debug, info};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use zip::ZipArchive;

/// Extract one subtitle entry of `archive_path` to `target`
///
/// With an entry name, exactly that entry is extracted (its `&`→`.` alias
/// is accepted as well). Without one, the first entry in archive order whose
/// extension is `extension` is used. The target is replaced atomically, so
/// a failure never leaves a partial file behind.
///
/// This is blocking; call it from a blocking-capable thread.
pub fn extract_subtitle(
    archive_path: &Path,
    entry_name: Option<&str>,
    extension: &str,
    target: &Path,
) -> Result<PathBuf> {
    let file =
        File::open(archive_path).map_err(|e| IoError::from_std(e).with_path(archive_path))?;
    let mut zip = ZipArchive::new(file).map_err(|e| RetrievalError::archive(archive_path, e))?;

    let index = match entry_name {
        Some(name) => find_named(&mut zip, name)
            .map_err(|e| RetrievalError::archive(archive_path, e))?
            .ok_or_else(|| RetrievalError::entry_not_found(archive_path, name))?,
        None => find_first_with_extension(&mut zip, extension)
            .map_err(|e| RetrievalError::archive(archive_path, e))?
            .ok_or_else(|| RetrievalError::no_subtitle_entry(archive_path, extension))?,
    };

    let mut entry = zip
        .by_index(index)
        .map_err(|e| RetrievalError::archive(archive_path, e))?;
    info!("Extracting subtitle {}", entry.name());

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_error = |e: std::io::Error| IoError::from_std(e).with_path(target);

    let mut staged = staging_file(dir, target).map_err(io_error)?;
    let copied = std::io::copy(&mut entry, &mut staged).map_err(io_error)?;
    staged
        .persist(target)
        .map_err(|e| IoError::from_std(e.error).with_path(target))?;

    debug!("Wrote {copied} bytes to {}", target.display());
    Ok(target.to_path_buf())
}

/// Temporary sibling of `target` with the permissions a plain write would get
///
/// An existing target keeps its mode. A new one is created 0o666 under the
/// process umask.
fn staging_file(dir: &Path, target: &Path) -> std::io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let staged = builder.tempfile_in(dir)?;

    if let Ok(existing) = std::fs::metadata(target) {
        staged.as_file().set_permissions(existing.permissions())?;
    }
    Ok(staged)
}

/// Index of the named entry, trying the exact name then its `&` alias
fn find_named<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    name: &str,
) -> zip::result::ZipResult<Option<usize>> {
    let alias = name.replace('&', ".");
    for candidate in [name, alias.as_str()] {
        for i in 0..zip.len() {
            if zip.by_index_raw(i)?.name() == candidate {
                return Ok(Some(i));
            }
        }
    }
    Ok(None)
}

/// Index of the first file entry whose extension matches, in archive order
fn find_first_with_extension<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    extension: &str,
) -> zip::result::ZipResult<Option<usize>> {
    for i in 0..zip.len() {
        let entry = zip.by_index_raw(i)?;
        if entry.is_dir() {
            continue;
        }
        let matches = Path::new(entry.name())
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            return Ok(Some(i));
        }
    }
    Ok(None)
}
