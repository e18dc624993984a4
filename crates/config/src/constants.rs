//! Fixed values baked into the installer
//!
//! The public key is the trust anchor for release signatures. It is
//! deliberately not exposed via TOML, environment or CLI configuration.

pub const APP_NAME: &str = "ghostty";
pub const APP_DISPLAY_NAME: &str = "Ghostty";
pub const APP_ID: &str = "com.mitchellh.ghostty";

pub const DEFAULT_VERSION: &str = "1.2.0";
pub const DEFAULT_TOOLCHAIN_VERSION: &str = "0.14.1";

pub const RELEASE_BASE_URL: &str = "https://release.files.ghostty.org";
pub const TOOLCHAIN_BASE_URL: &str = "https://ziglang.org/download";

/// Minisign public key the release tarballs are signed with
pub const RELEASE_PUBLIC_KEY: &str = "RWQlAjJC23149WL2sEpT/l0QKy7hMIFhYdQOFy0Z7z7PbneUgvlsnYcV";

pub const TOOLCHAIN_BINARY: &str = "zig";
pub const TOOLCHAIN_LIB_DIR: &str = "lib";
pub const TOOLCHAIN_DIR_NAME: &str = "compiler";

/// Paths inside the staged source tree
pub const LAUNCHER_TEMPLATE: &str = "dist/linux/app.desktop.in";
pub const SERVICE_MENU_SOURCE: &str = "dist/linux/ghostty_dolphin.desktop";

pub const LAUNCHER_FILE_NAME: &str = "ghostty.desktop";
pub const SERVICE_MENU_FILE_NAME: &str = "com.mitchellh.ghostty.desktop";

pub const LOCK_FILE_NAME: &str = ".ghostup.lock";

pub const CONTAINER_RUNTIME: &str = "podman";
pub const CONTAINERFILE: &str = "Containerfile";
pub const CONTAINER_IMAGE: &str = "ghostty-builder";
pub const CONTAINER_BINARY_PATH: &str = "/build/output/bin/ghostty";

/// Written to the application config path only when no file exists there
pub const DEFAULT_APP_CONFIG: &str = "\
font-size = 12
window-padding-x = 4
window-padding-y = 4
copy-on-select = clipboard
confirm-close-surface = false
";
