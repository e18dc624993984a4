//! Version identifier error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum VersionError {
    #[error("version must not be empty")]
    Empty,

    #[error("invalid version {input:?}: {reason}")]
    InvalidVersion { input: String, reason: String },
}

impl UserFacingError for VersionError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        Some("Use a release identifier such as 1.2.0.")
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Empty => "version.empty",
            Self::InvalidVersion { .. } => "version.invalid_version",
        };
        Some(code)
    }
}
