#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for ghostup
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/ghostup/config.toml)
//! - Environment variables
//! - CLI flags
//!
//! The merged [`Config`] is turned into an immutable [`InstallLayout`] once
//! at startup; pipeline components only ever see the layout.

pub mod constants;
mod layout;
mod sections;

pub use layout::InstallLayout;
pub use sections::{ContainerConfig, GeneralConfig, InstallConfig, NetworkConfig, SourcesConfig};

use ghostup_errors::{ConfigError, Error};
use ghostup_types::{ColorChoice, Version};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub install: InstallConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub container: ContainerConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("ghostup").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading config");
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: &Option<PathBuf>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // GHOSTUP_COLOR
        if let Ok(color) = std::env::var("GHOSTUP_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "GHOSTUP_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // GHOSTUP_VERSION
        if let Ok(version) = std::env::var("GHOSTUP_VERSION") {
            self.install.version = validated_version("GHOSTUP_VERSION", version)?;
        }

        // GHOSTUP_ZIG_VERSION
        if let Ok(version) = std::env::var("GHOSTUP_ZIG_VERSION") {
            self.install.zig_version = validated_version("GHOSTUP_ZIG_VERSION", version)?;
        }

        // GHOSTUP_PREFIX
        if let Ok(prefix) = std::env::var("GHOSTUP_PREFIX") {
            self.install.prefix = Some(non_empty_path("GHOSTUP_PREFIX", prefix)?);
        }

        // GHOSTUP_WORK_DIR
        if let Ok(work_dir) = std::env::var("GHOSTUP_WORK_DIR") {
            self.install.work_dir = Some(non_empty_path("GHOSTUP_WORK_DIR", work_dir)?);
        }

        // GHOSTUP_TIMEOUT
        if let Ok(timeout) = std::env::var("GHOSTUP_TIMEOUT") {
            self.network.timeout = timeout.parse().map_err(|_| ConfigError::InvalidValue {
                field: "GHOSTUP_TIMEOUT".to_string(),
                value: timeout,
            })?;
        }

        Ok(())
    }

    /// Release to install
    ///
    /// # Errors
    ///
    /// Returns an error if the configured version is not a valid identifier.
    pub fn release_version(&self) -> Result<Version, Error> {
        Version::parse(&self.install.version).map_err(Into::into)
    }

    /// Toolchain version to build with
    ///
    /// # Errors
    ///
    /// Returns an error if the configured version is not a valid identifier.
    pub fn toolchain_version(&self) -> Result<Version, Error> {
        Version::parse(&self.install.zig_version).map_err(Into::into)
    }

    /// Directory for debug log files
    #[must_use]
    pub fn log_dir() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_dir)
            .map(|dir| dir.join("ghostup").join("logs"))
    }
}

fn validated_version(field: &str, value: String) -> Result<String, Error> {
    match Version::parse(&value) {
        Ok(_) => Ok(value),
        Err(_) => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into()),
    }
}

fn non_empty_path(field: &str, value: String) -> Result<PathBuf, Error> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into());
    }
    Ok(PathBuf::from(value))
}
