//! Resolved filesystem layout for a run

use crate::constants;
use crate::Config;
use ghostup_errors::{ConfigError, Error};
use ghostup_types::Version;
use std::path::{Path, PathBuf};

/// Every path the pipeline reads or writes, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    /// Downloads, staged source trees and the run lock
    pub work_dir: PathBuf,
    /// Holds the toolchain binary and its `lib` directory
    pub toolchain_dir: PathBuf,
    /// Build output root; the binary lands in `<prefix>/bin`
    pub prefix: PathBuf,
    pub applications_dir: PathBuf,
    pub service_menu_dir: PathBuf,
    /// The terminal's own user configuration file
    pub app_config_path: PathBuf,
    /// Used by container builds; its parent is the build context
    pub containerfile: PathBuf,
}

impl InstallLayout {
    /// Resolve the layout from merged configuration and the user's
    /// standard directories
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory or current directory cannot
    /// be determined.
    pub fn resolve(config: &Config) -> Result<Self, Error> {
        let home = dirs::home_dir().ok_or_else(|| ConfigError::MissingField {
            field: "home".to_string(),
        })?;
        let cwd = std::env::current_dir().map_err(|e| Error::io_with_path(&e, "."))?;

        let work_dir = config
            .install
            .work_dir
            .as_ref()
            .map_or_else(|| cwd.clone(), |dir| absolutize(&cwd, dir));
        let toolchain_dir = config.install.toolchain_dir.as_ref().map_or_else(
            || work_dir.join(constants::TOOLCHAIN_DIR_NAME),
            |dir| absolutize(&cwd, dir),
        );
        let prefix = config
            .install
            .prefix
            .as_ref()
            .map_or_else(|| home.join(".local"), |dir| absolutize(&cwd, dir));

        let data_dir = dirs::data_dir().unwrap_or_else(|| home.join(".local").join("share"));
        let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));

        Ok(Self {
            work_dir,
            toolchain_dir,
            prefix,
            applications_dir: data_dir.join("applications"),
            service_menu_dir: data_dir.join("kio").join("servicemenus"),
            app_config_path: config_dir.join(constants::APP_NAME).join("config"),
            containerfile: absolutize(&cwd, &config.container.containerfile),
        })
    }

    /// Layout rooted entirely under `root`, for sandboxed runs and tests
    #[must_use]
    pub fn rooted_at(root: &Path) -> Self {
        let work_dir = root.join("work");
        Self {
            toolchain_dir: work_dir.join(constants::TOOLCHAIN_DIR_NAME),
            work_dir,
            prefix: root.join("prefix"),
            applications_dir: root.join("share").join("applications"),
            service_menu_dir: root.join("share").join("kio").join("servicemenus"),
            app_config_path: root.join("config").join(constants::APP_NAME).join("config"),
            containerfile: root.join(constants::CONTAINERFILE),
        }
    }

    /// `<work_dir>/ghostty-<version>`
    #[must_use]
    pub fn staged_source_dir(&self, version: &Version) -> PathBuf {
        self.work_dir.join(release_stem(version))
    }

    #[must_use]
    pub fn release_archive_path(&self, version: &Version) -> PathBuf {
        self.work_dir.join(format!("{}.tar.gz", release_stem(version)))
    }

    #[must_use]
    pub fn release_signature_path(&self, version: &Version) -> PathBuf {
        self.work_dir.join(format!("{}.tar.gz.minisig", release_stem(version)))
    }

    #[must_use]
    pub fn toolchain_binary(&self) -> PathBuf {
        self.toolchain_dir.join(constants::TOOLCHAIN_BINARY)
    }

    #[must_use]
    pub fn toolchain_lib_dir(&self) -> PathBuf {
        self.toolchain_dir.join(constants::TOOLCHAIN_LIB_DIR)
    }

    /// `<prefix>/bin/ghostty`
    #[must_use]
    pub fn binary_path(&self) -> PathBuf {
        self.prefix.join("bin").join(constants::APP_NAME)
    }

    #[must_use]
    pub fn launcher_path(&self) -> PathBuf {
        self.applications_dir.join(constants::LAUNCHER_FILE_NAME)
    }

    #[must_use]
    pub fn service_menu_path(&self) -> PathBuf {
        self.service_menu_dir.join(constants::SERVICE_MENU_FILE_NAME)
    }

    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.work_dir.join(constants::LOCK_FILE_NAME)
    }
}

fn release_stem(version: &Version) -> String {
    format!("{}-{version}", constants::APP_NAME)
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_follow_version() {
        let layout = InstallLayout::rooted_at(Path::new("/r"));
        let version = Version::parse("1.2.0").unwrap();

        assert_eq!(
            layout.staged_source_dir(&version),
            PathBuf::from("/r/work/ghostty-1.2.0")
        );
        assert_eq!(
            layout.release_archive_path(&version),
            PathBuf::from("/r/work/ghostty-1.2.0.tar.gz")
        );
        assert_eq!(
            layout.release_signature_path(&version),
            PathBuf::from("/r/work/ghostty-1.2.0.tar.gz.minisig")
        );
        assert_eq!(layout.toolchain_binary(), PathBuf::from("/r/work/compiler/zig"));
        assert_eq!(layout.binary_path(), PathBuf::from("/r/prefix/bin/ghostty"));
        assert_eq!(
            layout.service_menu_path(),
            PathBuf::from("/r/share/kio/servicemenus/com.mitchellh.ghostty.desktop")
        );
    }

    #[test]
    fn resolve_honours_overrides() {
        let mut config = Config::default();
        config.install.work_dir = Some(PathBuf::from("/srv/build"));
        config.install.prefix = Some(PathBuf::from("/opt/ghostty"));

        let layout = InstallLayout::resolve(&config).unwrap();
        assert_eq!(layout.work_dir, PathBuf::from("/srv/build"));
        assert_eq!(layout.toolchain_dir, PathBuf::from("/srv/build/compiler"));
        assert_eq!(layout.binary_path(), PathBuf::from("/opt/ghostty/bin/ghostty"));
        assert!(layout.containerfile.is_absolute());
    }
}
