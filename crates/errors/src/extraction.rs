//! Archive extraction error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ExtractionError {
    #[error("cannot read archive {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("archive {archive} contains unsafe entry {entry}")]
    UnsafePath { archive: String, entry: String },

    #[error("archive {path} is empty")]
    EmptyArchive { path: String },

    #[error("unsupported archive format: {path}")]
    UnsupportedFormat { path: String },

    #[error("failed to move extracted tree into {dest}: {message}")]
    PlacementFailed { dest: String, message: String },
}

impl UserFacingError for ExtractionError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Unreadable { .. } | Self::EmptyArchive { .. } => {
                Some("The downloaded archive is corrupt. Re-run with --pull-always to fetch it again.")
            }
            Self::PlacementFailed { .. } => {
                Some("Ensure the working directory is writable and has free space.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Unreadable { .. } => "extraction.unreadable",
            Self::UnsafePath { .. } => "extraction.unsafe_path",
            Self::EmptyArchive { .. } => "extraction.empty_archive",
            Self::UnsupportedFormat { .. } => "extraction.unsupported_format",
            Self::PlacementFailed { .. } => "extraction.placement_failed",
        };
        Some(code)
    }
}
