//! Configuration sections

use crate::constants;
use ghostup_types::ColorChoice;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
        }
    }
}

/// What to install and where
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_toolchain_version")]
    pub zig_version: String,
    /// Install prefix, defaults to `$HOME/.local`
    pub prefix: Option<PathBuf>,
    /// Download and staging root, defaults to the current directory
    pub work_dir: Option<PathBuf>,
    /// Defaults to `<work_dir>/compiler`
    pub toolchain_dir: Option<PathBuf>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            zig_version: default_toolchain_version(),
            prefix: None,
            work_dir: None,
            toolchain_dir: None,
        }
    }
}

/// Download locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_release_base_url")]
    pub release_base_url: String,
    #[serde(default = "default_toolchain_base_url")]
    pub toolchain_base_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            release_base_url: default_release_base_url(),
            toolchain_base_url: default_toolchain_base_url(),
        }
    }
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout")]
    pub timeout: u64, // seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: 300, // 5 minutes
            connect_timeout: 30,
        }
    }
}

/// Container build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    #[serde(default = "default_runtime")]
    pub runtime: String,
    /// Resolved against the current directory
    #[serde(default = "default_containerfile")]
    pub containerfile: PathBuf,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            runtime: default_runtime(),
            containerfile: default_containerfile(),
        }
    }
}

// Default value functions for serde
fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_version() -> String {
    constants::DEFAULT_VERSION.to_string()
}

fn default_toolchain_version() -> String {
    constants::DEFAULT_TOOLCHAIN_VERSION.to_string()
}

fn default_release_base_url() -> String {
    constants::RELEASE_BASE_URL.to_string()
}

fn default_toolchain_base_url() -> String {
    constants::TOOLCHAIN_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    300
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_runtime() -> String {
    constants::CONTAINER_RUNTIME.to_string()
}

fn default_containerfile() -> PathBuf {
    PathBuf::from(constants::CONTAINERFILE)
}
