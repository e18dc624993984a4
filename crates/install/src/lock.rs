//! Advisory run lock over the work directory

use fs2::FileExt;
use ghostup_errors::{Error, InstallError};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Exclusive lock held for the lifetime of a pipeline run
///
/// The operating system releases the lock when the file handle is dropped.
#[derive(Debug)]
pub struct InstallLock {
    path: PathBuf,
    _file: File,
}

impl InstallLock {
    /// Take the lock at `path` without blocking
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Locked`] when another process holds it, or an
    /// I/O error if the lock file cannot be opened.
    pub fn acquire(path: &Path) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(&e, parent))?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| Error::io_with_path(&e, path))?;

        match FileExt::try_lock_exclusive(&file) {
            Ok(()) => Ok(Self {
                path: path.to_path_buf(),
                _file: file,
            }),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(InstallError::Locked {
                    path: path.display().to_string(),
                }
                .into())
            }
            Err(e) => Err(Error::io_with_path(&e, path)),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("work").join(".ghostup.lock");

        let held = InstallLock::acquire(&path).unwrap();
        assert_eq!(held.path(), path);

        let err = InstallLock::acquire(&path).unwrap_err();
        assert!(matches!(err, Error::Install(InstallError::Locked { .. })));

        drop(held);
        InstallLock::acquire(&path).unwrap();
    }
}
