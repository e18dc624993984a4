//! Toolchain acquisition
//!
//! The toolchain is a prebuilt compiler tarball from a separate distribution
//! channel. It is fetched once into the toolchain directory and then trusted
//! for as long as its binary is present.

use ghostup_config::constants::{TOOLCHAIN_BINARY, TOOLCHAIN_LIB_DIR};
use ghostup_errors::{Error, ToolchainError};
use ghostup_events::{EventEmitter, EventSender};
use ghostup_net::{download_file, join_url, NetClient};
use ghostup_platform::fs;
use ghostup_types::{StageOutcome, Version};
use std::path::{Path, PathBuf};

use crate::archive::extract_archive;

/// Ensures `<toolchain_dir>/zig` and `<toolchain_dir>/lib` exist
#[derive(Debug, Clone)]
pub struct ToolchainManager {
    client: NetClient,
    base_url: String,
    toolchain_dir: PathBuf,
}

impl ToolchainManager {
    #[must_use]
    pub fn new(client: NetClient, base_url: impl Into<String>, toolchain_dir: PathBuf) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            toolchain_dir,
        }
    }

    #[must_use]
    pub fn binary_path(&self) -> PathBuf {
        self.toolchain_dir.join(TOOLCHAIN_BINARY)
    }

    #[must_use]
    pub fn lib_dir(&self) -> PathBuf {
        self.toolchain_dir.join(TOOLCHAIN_LIB_DIR)
    }

    /// Archive name for the host platform, e.g. `zig-x86_64-linux-0.14.1.tar.xz`
    ///
    /// # Errors
    ///
    /// Returns [`ToolchainError::UnsupportedPlatform`] when no prebuilt
    /// toolchain exists for the host.
    pub fn archive_name(version: &Version) -> Result<String, ToolchainError> {
        let (arch, os) = host_platform()?;
        Ok(format!("zig-{arch}-{os}-{version}.tar.xz"))
    }

    /// The only idempotence gate: the binary exists and is executable
    pub async fn is_installed(&self) -> bool {
        fs::is_executable(&self.binary_path()).await
    }

    /// Remove the installed toolchain so the next `ensure` fetches it again
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be removed.
    pub async fn reset(&self) -> Result<(), Error> {
        fs::remove_dir_all(&self.toolchain_dir).await
    }

    /// Fetch and unpack the toolchain unless it is already installed
    ///
    /// # Errors
    ///
    /// Returns network, extraction or [`ToolchainError`] failures. The
    /// toolchain directory is only replaced once extraction fully succeeded.
    pub async fn ensure(&self, version: &Version, tx: &EventSender) -> Result<StageOutcome, Error> {
        if self.is_installed().await {
            tx.emit_debug(format!(
                "toolchain present at {}",
                self.binary_path().display()
            ));
            return Ok(StageOutcome::AlreadySatisfied);
        }

        let archive_name = Self::archive_name(version)?;
        let url = join_url(&self.base_url, &[version.as_str(), archive_name.as_str()])?;
        let archive_path = self.archive_path(&archive_name);

        if let Some(parent) = archive_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        download_file(&self.client, &url, &archive_path, tx).await?;
        tx.emit_debug(format!(
            "toolchain archive {archive_name} is not signature-checked"
        ));

        let extracted = extract_archive(&archive_path, &self.toolchain_dir).await;
        let removed = fs::remove_file(&archive_path).await;
        extracted?;
        removed?;
        tx.emit_archive_extracted(archive_path.clone(), self.toolchain_dir.clone());

        self.check_layout(&archive_path).await?;
        Ok(StageOutcome::Completed)
    }

    async fn check_layout(&self, archive: &Path) -> Result<(), Error> {
        let binary = self.binary_path();
        if !fs::is_executable(&binary).await {
            return Err(ToolchainError::BinaryMissing {
                path: binary.display().to_string(),
                archive: archive.display().to_string(),
            }
            .into());
        }
        let lib = self.lib_dir();
        if !fs::is_dir(&lib).await {
            return Err(ToolchainError::LibraryMissing {
                path: lib.display().to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Downloads land next to the toolchain directory, never inside it
    fn archive_path(&self, archive_name: &str) -> PathBuf {
        self.toolchain_dir
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(archive_name)
    }
}

fn host_platform() -> Result<(&'static str, &'static str), ToolchainError> {
    use std::env::consts::{ARCH, OS};
    platform_names(ARCH, OS, cfg!(target_endian = "little"))
}

/// Map Rust target names onto the toolchain's archive naming
fn platform_names(
    arch: &str,
    os: &str,
    little_endian: bool,
) -> Result<(&'static str, &'static str), ToolchainError> {
    let zig_arch = match arch {
        "x86_64" => Some("x86_64"),
        "aarch64" => Some("aarch64"),
        "riscv64" => Some("riscv64"),
        "powerpc64" if little_endian => Some("powerpc64le"),
        "x86" => Some("x86"),
        "arm" => Some("arm"),
        "loongarch64" => Some("loongarch64"),
        _ => None,
    };
    let zig_os = match os {
        "linux" => Some("linux"),
        "macos" => Some("macos"),
        "freebsd" => Some("freebsd"),
        _ => None,
    };

    match (zig_arch, zig_os) {
        (Some(a), Some(o)) => Ok((a, o)),
        _ => Err(ToolchainError::UnsupportedPlatform {
            arch: arch.to_string(),
            os: os.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_names() {
        assert_eq!(
            platform_names("x86_64", "linux", true).unwrap(),
            ("x86_64", "linux")
        );
        assert_eq!(
            platform_names("powerpc64", "linux", true).unwrap(),
            ("powerpc64le", "linux")
        );
        assert!(platform_names("powerpc64", "linux", false).is_err());
        assert!(matches!(
            platform_names("x86_64", "windows", true),
            Err(ToolchainError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn test_archive_name_uses_version() {
        let name = ToolchainManager::archive_name(&Version::parse("0.14.1").unwrap()).unwrap();
        assert!(name.starts_with("zig-"));
        assert!(name.ends_with("-0.14.1.tar.xz"));
    }

    #[test]
    fn test_archive_lands_beside_toolchain_dir() {
        let manager = ToolchainManager::new(
            NetClient::with_defaults().unwrap(),
            "https://ziglang.org/download",
            PathBuf::from("/w/compiler"),
        );
        assert_eq!(
            manager.archive_path("zig.tar.xz"),
            PathBuf::from("/w/zig.tar.xz")
        );
    }
}
