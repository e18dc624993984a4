//! Build system error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum BuildError {
    /// The build tool ran and reported failure. `output` holds everything it
    /// wrote to stdout and stderr and is kept out of the message.
    #[error("`{command}` failed with {status}")]
    Failed {
        command: String,
        status: String,
        output: String,
    },

    #[error("failed to launch `{command}`: {message}")]
    SpawnFailed { command: String, message: String },

    #[error("container runtime `{runtime}` is not available: {message}")]
    RuntimeUnavailable { runtime: String, message: String },

    #[error("container file not found at {path}")]
    ContainerfileMissing { path: String },

    #[error("failed to install build output to {dest}: {message}")]
    InstallFailed { dest: String, message: String },
}

impl BuildError {
    /// Captured output of a failed build command
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Failed { output, .. } => Some(output),
            _ => None,
        }
    }
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Failed { .. } => {
                Some("Inspect the build output below; the staged source and toolchain are kept for the next run.")
            }
            Self::RuntimeUnavailable { .. } => {
                Some("Install podman (e.g. `sudo dnf install podman`) or build without --container.")
            }
            Self::ContainerfileMissing { .. } => {
                Some("Run ghostup from the directory that contains the Containerfile.")
            }
            Self::SpawnFailed { .. } | Self::InstallFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Failed { .. } => "build.failed",
            Self::SpawnFailed { .. } => "build.spawn_failed",
            Self::RuntimeUnavailable { .. } => "build.runtime_unavailable",
            Self::ContainerfileMissing { .. } => "build.containerfile_missing",
            Self::InstallFailed { .. } => "build.install_failed",
        };
        Some(code)
    }
}
