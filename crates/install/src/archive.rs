//! Atomic tarball extraction
//!
//! Archives are unpacked into a temporary directory next to the destination
//! and renamed into place only when every entry has been written. A single
//! top-level directory in the archive is flattened away, so
//! `zig-x86_64-linux-0.14.1/zig` lands at `<dest>/zig`.

use flate2::read::GzDecoder;
use ghostup_errors::{Error, ExtractionError};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tar::Archive;
use xz2::read::XzDecoder;

/// Compression wrapped around the tar stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    TarXz,
}

impl ArchiveFormat {
    /// Detect the format from the file name
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::UnsupportedFormat`] for anything other than
    /// `.tar.gz`, `.tgz` or `.tar.xz`.
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Ok(Self::TarGz)
        } else if name.ends_with(".tar.xz") {
            Ok(Self::TarXz)
        } else {
            Err(ExtractionError::UnsupportedFormat {
                path: path.display().to_string(),
            })
        }
    }
}

/// Extract `archive` so that its contents end up directly in `dest`
///
/// Any existing `dest` is replaced. On failure `dest` is left untouched.
///
/// # Errors
///
/// Returns an error if the archive is unreadable, empty, contains entries
/// escaping the destination, or the tree cannot be moved into place.
pub async fn extract_archive(archive: &Path, dest: &Path) -> Result<(), Error> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || extract_archive_blocking(&archive, &dest))
        .await
        .map_err(|e| Error::internal(format!("extraction task failed: {e}")))?
}

fn extract_archive_blocking(archive: &Path, dest: &Path) -> Result<(), Error> {
    let format = ArchiveFormat::from_path(archive)?;
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| placement_failed(dest, &e))?;

    let staging = tempfile::Builder::new()
        .prefix(".ghostup-extract-")
        .tempdir_in(parent)
        .map_err(|e| placement_failed(dest, &e))?;

    let file = File::open(archive).map_err(|e| unreadable(archive, &e))?;
    let entries = match format {
        ArchiveFormat::TarGz => unpack_tar(GzDecoder::new(file), archive, staging.path())?,
        ArchiveFormat::TarXz => unpack_tar(XzDecoder::new(file), archive, staging.path())?,
    };
    if entries == 0 {
        return Err(ExtractionError::EmptyArchive {
            path: archive.display().to_string(),
        }
        .into());
    }

    let root = content_root(staging.path()).map_err(|e| placement_failed(dest, &e))?;

    match fs::remove_dir_all(dest) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(placement_failed(dest, &e)),
    }
    fs::rename(&root, dest).map_err(|e| placement_failed(dest, &e))?;

    // staging drops here and removes whatever is left of the wrapper dir
    Ok(())
}

fn unpack_tar<R: Read>(reader: R, archive_path: &Path, target: &Path) -> Result<usize, Error> {
    let mut archive = Archive::new(reader);
    archive.set_preserve_permissions(true);
    archive.set_overwrite(true);

    let mut count = 0;
    for entry in archive.entries().map_err(|e| unreadable(archive_path, &e))? {
        let mut entry = entry.map_err(|e| unreadable(archive_path, &e))?;
        let entry_path: PathBuf = entry
            .path()
            .map_err(|e| unreadable(archive_path, &e))?
            .into_owned();

        ensure_safe_entry(&entry_path, archive_path)?;

        let unpacked = entry
            .unpack_in(target)
            .map_err(|e| unreadable(archive_path, &e))?;
        if !unpacked {
            return Err(unsafe_entry(archive_path, &entry_path));
        }
        count += 1;
    }
    Ok(count)
}

fn ensure_safe_entry(entry: &Path, archive: &Path) -> Result<(), Error> {
    for component in entry.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_entry(archive, entry));
            }
        }
    }
    Ok(())
}

/// The single top-level directory if there is exactly one, else `staging`
fn content_root(staging: &Path) -> std::io::Result<PathBuf> {
    let mut top = fs::read_dir(staging)?.collect::<std::io::Result<Vec<_>>>()?;
    if top.len() == 1 && top[0].file_type()?.is_dir() {
        return Ok(top.remove(0).path());
    }
    Ok(staging.to_path_buf())
}

fn unreadable(path: &Path, error: &std::io::Error) -> Error {
    ExtractionError::Unreadable {
        path: path.display().to_string(),
        message: error.to_string(),
    }
    .into()
}

fn unsafe_entry(archive: &Path, entry: &Path) -> Error {
    ExtractionError::UnsafePath {
        archive: archive.display().to_string(),
        entry: entry.display().to_string(),
    }
    .into()
}

fn placement_failed(dest: &Path, error: &std::io::Error) -> Error {
    ExtractionError::PlacementFailed {
        dest: dest.display().to_string(),
        message: error.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::tempdir;

    fn tar_gz(path: &Path, files: &[(&str, &[u8])]) {
        let encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, data) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, *data).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("ghostty-1.2.0.tar.gz")).unwrap(),
            ArchiveFormat::TarGz
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("zig-x86_64-linux-0.14.1.tar.xz")).unwrap(),
            ArchiveFormat::TarXz
        );
        assert!(ArchiveFormat::from_path(Path::new("zig.zip")).is_err());
    }

    #[tokio::test]
    async fn test_single_root_is_flattened() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("ghostty-1.2.0.tar.gz");
        tar_gz(
            &archive,
            &[
                ("ghostty-1.2.0/build.zig", b"// build"),
                ("ghostty-1.2.0/dist/linux/app.desktop.in", b"[Desktop Entry]"),
            ],
        );
        let dest = temp.path().join("work").join("ghostty-1.2.0");

        extract_archive(&archive, &dest).await.unwrap();

        assert!(dest.join("build.zig").is_file());
        assert!(dest.join("dist/linux/app.desktop.in").is_file());
        let leftovers: Vec<_> = fs::read_dir(temp.path().join("work"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("ghostty-1.2.0")]);
    }

    #[tokio::test]
    async fn test_multiple_roots_are_kept() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("flat.tar.gz");
        tar_gz(&archive, &[("a.txt", b"a"), ("b.txt", b"b")]);
        let dest = temp.path().join("out");

        extract_archive(&archive, &dest).await.unwrap();

        assert!(dest.join("a.txt").is_file());
        assert!(dest.join("b.txt").is_file());
    }

    #[tokio::test]
    async fn test_corrupt_archive_leaves_no_destination() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("broken.tar.gz");
        fs::write(&archive, b"definitely not gzip").unwrap();
        let dest = temp.path().join("out");

        let err = extract_archive(&archive, &dest).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Extraction(ExtractionError::Unreadable { .. })
        ));
        assert!(!dest.exists());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_parent_components_are_rejected() {
        let err = ensure_safe_entry(Path::new("../etc/passwd"), Path::new("evil.tar.gz"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Extraction(ExtractionError::UnsafePath { .. })
        ));
        assert!(ensure_safe_entry(Path::new("./ok/file"), Path::new("a.tar.gz")).is_ok());
    }
}
