//! Scoped ownership of the downloaded archive

use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A temporary archive path that is removed when the guard is dropped
///
/// Removal happens on every exit: success, error, or unwinding.
#[derive(Debug)]
pub struct TempArchive {
    path: PathBuf,
}

impl TempArchive {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArchive {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed temporary archive {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove temporary archive {}: {e}",
                self.path.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub.zip");
        std::fs::write(&path, b"PK").unwrap();

        {
            let guard = TempArchive::new(path.clone());
            assert!(guard.path().exists());
        }

        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_is_fine() {
        let dir = TempDir::new().unwrap();
        drop(TempArchive::new(dir.path().join("never-created.zip")));
    }

    #[test]
    fn test_removed_during_unwind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub.zip");
        std::fs::write(&path, b"PK").unwrap();

        let guarded = path.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = TempArchive::new(guarded);
            panic!("extraction blew up");
        });

        assert!(result.is_err());
        assert!(!path.exists());
    }
}
