//! Filesystem convenience helpers.
//!
//! All helpers return `ghostup_errors::Error` with the offending path
//! attached so callers can propagate with `?`.

use ghostup_errors::Error;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Result type for filesystem operations
pub type Result<T> = std::result::Result<T, Error>;

/// Create directory and all parent directories
///
/// # Errors
///
/// Returns an error if a component cannot be created.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| Error::io_with_path(&e, path))
}

/// Remove a directory tree, treating a missing path as success
///
/// # Errors
///
/// Returns an error if the tree exists but cannot be removed.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io_with_path(&e, path)),
    }
}

/// Remove a single file, treating a missing path as success
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io_with_path(&e, path)),
    }
}

/// Rename `src` onto `dst`
///
/// # Errors
///
/// Returns an error if the rename fails (permissions, cross-device, etc.)
pub async fn rename(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst)
        .await
        .map_err(|e| Error::io_with_path(&e, dst))
}

/// Check if a path exists
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Check if a path is a directory
pub async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}

/// Check that `path` is a regular file with an execute bit set
#[cfg(unix)]
pub async fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match fs::metadata(path).await {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
pub async fn is_executable(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_file())
}

/// Set mode 0755 on `path`
///
/// # Errors
///
/// Returns an error if the permissions cannot be changed.
#[cfg(unix)]
pub async fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .map_err(|e| Error::io_with_path(&e, path))
}

#[cfg(not(unix))]
pub async fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Write `contents` to a sibling temp file and rename it onto `path`
///
/// Creates the parent directory if needed. Readers never observe a
/// partially written file.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or the write or rename
/// fails.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await?;
    }

    let temp = temp_sibling(path);
    if let Err(e) = fs::write(&temp, contents).await {
        let _ = fs::remove_file(&temp).await;
        return Err(Error::io_with_path(&e, path));
    }
    if let Err(err) = rename(&temp, path).await {
        let _ = fs::remove_file(&temp).await;
        return Err(err);
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".tmp-{}", std::process::id()));
    PathBuf::from(name)
}
