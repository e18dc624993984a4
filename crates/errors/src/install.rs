//! Installation error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum InstallError {
    #[error("build finished but no binary was installed at {path}")]
    ArtifactMissing { path: String },

    #[error("installed file {path} is not executable")]
    NotExecutable { path: String },

    #[error("another ghostup run holds the lock at {path}")]
    Locked { path: String },
}

impl UserFacingError for InstallError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ArtifactMissing { .. } | Self::NotExecutable { .. } => Some(
                "The build tool did not place the expected binary; check the install prefix and the build output.",
            ),
            Self::Locked { .. } => Some("Wait for the other run to finish and try again."),
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ArtifactMissing { .. } => "install.artifact_missing",
            Self::NotExecutable { .. } => "install.not_executable",
            Self::Locked { .. } => "install.locked",
        };
        Some(code)
    }
}
