//! Build toolchain error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ToolchainError {
    #[error("toolchain binary missing at {path} after extracting {archive}")]
    BinaryMissing { path: String, archive: String },

    #[error("toolchain support library missing at {path}")]
    LibraryMissing { path: String },

    #[error("no prebuilt toolchain for {arch}-{os}")]
    UnsupportedPlatform { arch: String, os: String },
}

impl UserFacingError for ToolchainError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::BinaryMissing { .. } | Self::LibraryMissing { .. } => Some(
                "Clear the toolchain directory (or pass --pull-always) and run the installer again.",
            ),
            Self::UnsupportedPlatform { .. } => {
                Some("Use --container to build inside a container instead.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::BinaryMissing { .. } => "toolchain.binary_missing",
            Self::LibraryMissing { .. } => "toolchain.library_missing",
            Self::UnsupportedPlatform { .. } => "toolchain.unsupported_platform",
        };
        Some(code)
    }
}
